//! Per-band pipeline and result assembly
//!
//! Runs the detection stages in order for each band and assembles the
//! parallel-array results:
//! - Band pipeline
//! - Result types

pub mod pipeline;
pub mod result;
