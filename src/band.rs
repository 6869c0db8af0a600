//! Frequency band definitions and STFT bin mapping

use serde::{Deserialize, Serialize};

/// A frequency band to analyze
///
/// Caller-supplied and treated as immutable; the engine copies it verbatim
/// into the matching [`BandResult`](crate::analysis::result::BandResult) so
/// downstream consumers can correlate results without bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDefinition {
    /// Human-readable band name (e.g. "kick", "hats")
    pub name: String,

    /// Target center frequency in Hz
    pub target_frequency: f32,

    /// Display color hint for downstream visualization, passed through verbatim
    pub display_color: String,
}

impl BandDefinition {
    /// Create a new band definition
    pub fn new(name: &str, target_frequency: f32, display_color: &str) -> Self {
        Self {
            name: name.to_string(),
            target_frequency,
            display_color: display_color.to_string(),
        }
    }
}

/// Center frequency in Hz of an STFT magnitude bin
///
/// Bins span DC to just below Nyquist: `freq(i) = i * sample_rate / (2 * num_bins)`.
/// Returns 0.0 for a degenerate `num_bins` of 0.
pub fn bin_frequency(index: usize, sample_rate: u32, num_bins: usize) -> f32 {
    if num_bins == 0 {
        return 0.0;
    }

    // Frequency resolution: sample_rate / (2 * num_bins)
    let freq_resolution = sample_rate as f32 / (2.0 * num_bins as f32);
    index as f32 * freq_resolution
}

/// Map a target frequency to the nearest STFT bin
///
/// Returns the index minimizing `|freq(i) - target_hz|`; ties break toward
/// the lower index, and frequencies above Nyquist clamp to `num_bins - 1`.
/// Returns `None` when `num_bins` is 0 (degenerate sequence).
pub fn bin_for_frequency(target_hz: f32, sample_rate: u32, num_bins: usize) -> Option<usize> {
    if num_bins == 0 {
        return None;
    }

    let mut best_index = 0;
    let mut best_distance = f32::INFINITY;

    for index in 0..num_bins {
        let distance = (bin_frequency(index, sample_rate, num_bins) - target_hz).abs();
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }

    Some(best_index)
}
