//! Detection pipeline stages
//!
//! This module contains the per-band pipeline stages:
//! - Magnitude extraction and causal smoothing
//! - Derivative estimation (3 estimators)
//! - Detection function construction (4 modes)
//! - Adaptive thresholding (median + MAD) with minimum separation
//! - Sustained impulse classification

pub mod derivative;
pub mod detection;
pub mod magnitude;
pub mod sustain;
pub mod threshold;
