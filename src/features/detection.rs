//! Detection function construction
//!
//! Builds the per-frame detection function and pre-normalization impulse
//! strengths for one band, dispatching once on the configured
//! [`DetectionMode`].
//!
//! Algorithm per mode:
//! 1. SpectralFlux: half-wave rectified flux, adaptive threshold, minimum
//!    separation, then sustain classification
//! 2. FirstDerivative / SecondDerivative: absolute derivative gated by the
//!    raw-magnitude silence mask
//! 3. ZScore: z-normalized first derivative, masked, then z-normalized again
//!
//! Optional outputs are `Some` only for the modes that define them; absent
//! means "not defined for this mode", never "happened to be empty".

use crate::config::{DetectionConfig, DetectionMode};
use crate::features::{sustain, threshold};
use crate::stats;

/// Mode-specific outputs for one band
#[derive(Debug, Clone)]
pub struct DetectionOutput {
    /// Pre-normalization impulse strengths, one per frame
    pub impulse_strengths: Vec<f32>,

    /// The detection function the strengths were derived from
    pub detection_function: Option<Vec<f32>>,

    /// Adaptive threshold series (spectral-flux mode only)
    pub threshold: Option<Vec<f32>>,

    /// Sustained impulse strengths (spectral-flux mode only)
    pub sustained_impulses: Option<Vec<f32>>,
}

/// Half-wave rectified spectral flux of a processed magnitude series
///
/// `flux[i] = max(0, x[i] - x[i-1])`; frame 0 has no predecessor and is 0.
/// Only increases count, so decays and releases produce no flux.
pub fn spectral_flux(processed: &[f32]) -> Vec<f32> {
    let mut flux = vec![0.0f32; processed.len()];

    for i in 1..processed.len() {
        flux[i] = (processed[i] - processed[i - 1]).max(0.0);
    }

    flux
}

/// Raw-magnitude silence mask
///
/// True where the raw (pre-smoothing) magnitude strictly exceeds the
/// threshold. Derivatives run on the smoothed series, but the mask reads the
/// raw one so smoothing cannot hide real silence.
fn magnitude_mask(raw_magnitudes: &[f32], min_magnitude_threshold: f32) -> Vec<bool> {
    raw_magnitudes
        .iter()
        .map(|&m| m > min_magnitude_threshold)
        .collect()
}

/// Absolute values gated by the silence mask
fn masked_abs(series: &[f32], mask: &[bool]) -> Vec<f32> {
    series
        .iter()
        .zip(mask.iter())
        .map(|(&d, &keep)| if keep { d.abs() } else { 0.0 })
        .collect()
}

/// Build the detection function and impulse strengths for one band
///
/// `raw_magnitudes` is the pre-smoothing series (silence mask, sustain
/// gates), `processed_magnitudes` the smoothed and optionally log-compressed
/// series the flux runs on, and the derivative arrays come from the
/// configured estimator over the processed series.
pub fn build_detection(
    raw_magnitudes: &[f32],
    processed_magnitudes: &[f32],
    derivatives: &[f32],
    second_derivatives: &[f32],
    config: &DetectionConfig,
) -> DetectionOutput {
    log::debug!(
        "Building {:?} detection function over {} frames",
        config.mode,
        processed_magnitudes.len()
    );

    match config.mode {
        DetectionMode::SpectralFlux => {
            let flux = spectral_flux(processed_magnitudes);
            let thresholds = threshold::adaptive_threshold(
                &flux,
                config.spectral_flux.window,
                config.spectral_flux.k_factor,
            );
            let strengths = threshold::pick_impulses(
                &flux,
                &thresholds,
                config.spectral_flux.min_separation_frames,
            );
            let sustained = sustain::classify_sustained(raw_magnitudes, &strengths, &config.sustain);

            DetectionOutput {
                impulse_strengths: strengths,
                detection_function: Some(flux),
                threshold: Some(thresholds),
                sustained_impulses: Some(sustained),
            }
        }
        DetectionMode::FirstDerivative => {
            let mask = magnitude_mask(raw_magnitudes, config.min_magnitude_threshold);

            DetectionOutput {
                impulse_strengths: masked_abs(derivatives, &mask),
                detection_function: Some(derivatives.to_vec()),
                threshold: None,
                sustained_impulses: None,
            }
        }
        DetectionMode::SecondDerivative => {
            let mask = magnitude_mask(raw_magnitudes, config.min_magnitude_threshold);

            DetectionOutput {
                impulse_strengths: masked_abs(second_derivatives, &mask),
                detection_function: Some(second_derivatives.to_vec()),
                threshold: None,
                sustained_impulses: None,
            }
        }
        DetectionMode::ZScore => {
            // Step 1: Normalize the derivative series
            let scores = stats::z_score(derivatives);

            // Step 2: Zero masked frames, keeping the sign of the rest
            let mask = magnitude_mask(raw_magnitudes, config.min_magnitude_threshold);
            let masked: Vec<f32> = scores
                .iter()
                .zip(mask.iter())
                .map(|(&z, &keep)| if keep { z } else { 0.0 })
                .collect();

            // Step 3: Re-normalize the masked series as the strengths
            DetectionOutput {
                impulse_strengths: stats::z_score(&masked),
                detection_function: Some(scores),
                threshold: None,
                sustained_impulses: None,
            }
        }
    }
}
