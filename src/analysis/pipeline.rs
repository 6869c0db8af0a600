//! Per-band detection pipeline
//!
//! Composes the stages for a single band: bin mapping, magnitude extraction
//! and smoothing, derivative estimation, detection function construction,
//! and cross-band normalization. The orchestrator in the crate root walks
//! the band list and calls this once per band.

use crate::analysis::result::BandResult;
use crate::band::{self, BandDefinition};
use crate::config::DetectionConfig;
use crate::features::{derivative, detection, magnitude};
use crate::stats;

/// Run the full detection pipeline for one band
///
/// `num_bins` is the bin count of the first frame; shorter frames read as
/// silence at the mapped bin. A degenerate sequence (`num_bins` of 0) yields
/// a well-formed empty result instead of failing the request.
pub fn analyze_band(
    frames: &[Vec<f32>],
    band: &BandDefinition,
    band_index: usize,
    num_bins: usize,
    sample_rate: u32,
    hop_size: usize,
    config: &DetectionConfig,
) -> BandResult {
    let bin_index = match band::bin_for_frequency(band.target_frequency, sample_rate, num_bins) {
        Some(index) => index,
        None => {
            log::warn!(
                "Band '{}' has no STFT bin to map to (0 bins), returning empty result",
                band.name
            );
            return BandResult::empty(band.clone(), band_index);
        }
    };

    log::debug!(
        "Analyzing band '{}' ({:.1} Hz -> bin {}) over {} frames",
        band.name,
        band.target_frequency,
        bin_index,
        frames.len()
    );

    // Step 1: Magnitude series at the mapped bin, raw and smoothed
    let raw_magnitudes = magnitude::extract_bin_magnitudes(frames, bin_index);
    let magnitudes = magnitude::smooth_magnitudes(&raw_magnitudes, config.smoothing_window_size);

    // Step 2: Processed domain and its derivatives
    let processed = derivative::processed_magnitudes(&magnitudes, config.log_domain);
    let derivatives = derivative::differentiate(
        &processed,
        config.derivative_estimator,
        config.derivative_window_size,
    );
    let second_derivatives = derivative::differentiate(
        &derivatives,
        config.derivative_estimator,
        config.derivative_window_size,
    );

    // Step 3: Detection function and impulse strengths (mode dispatch)
    let output = detection::build_detection(
        &raw_magnitudes,
        &processed,
        &derivatives,
        &second_derivatives,
        config,
    );

    // Step 4: Normalize strengths for cross-band comparison
    let normalized_impulse_strengths = stats::z_score(&output.impulse_strengths);

    // Step 5: Frame timestamps, tied to the detection function's presence
    let detection_times = output
        .detection_function
        .as_ref()
        .map(|_| frame_times(frames.len(), sample_rate, hop_size));

    BandResult {
        band: band.clone(),
        band_index,
        bin_index,
        magnitudes,
        derivatives,
        second_derivatives,
        impulse_strengths: output.impulse_strengths,
        normalized_impulse_strengths,
        detection_function: output.detection_function,
        threshold: output.threshold,
        sustained_impulses: output.sustained_impulses,
        detection_times,
    }
}

/// Timestamp of each frame in seconds: `i * hop_size / sample_rate`
fn frame_times(num_frames: usize, sample_rate: u32, hop_size: usize) -> Vec<f32> {
    (0..num_frames)
        .map(|i| i as f32 * hop_size as f32 / sample_rate as f32)
        .collect()
}
