//! Per-bin magnitude extraction and smoothing
//!
//! Pulls one scalar per frame out of the STFT sequence for a mapped bin and
//! optionally applies a trailing (causal) moving average before the
//! derivative and detection stages.

use crate::stats;

/// Extract the magnitude series for one bin across all frames
///
/// Frames shorter than `bin_index + 1` contribute 0.0, so a ragged sequence
/// degrades to silence instead of failing the band.
pub fn extract_bin_magnitudes(frames: &[Vec<f32>], bin_index: usize) -> Vec<f32> {
    frames
        .iter()
        .map(|frame| frame.get(bin_index).copied().unwrap_or(0.0))
        .collect()
}

/// Smooth a magnitude series with a trailing moving average
///
/// A window of 1 (or 0) returns the series unchanged. The window shrinks
/// near index 0 rather than centering or padding, keeping the series causal.
pub fn smooth_magnitudes(magnitudes: &[f32], window: usize) -> Vec<f32> {
    if window <= 1 {
        return magnitudes.to_vec();
    }

    stats::trailing_mean(magnitudes, window)
}
