//! Detection result types

use serde::{Deserialize, Serialize};

use crate::band::BandDefinition;

/// Complete detection result for one band
///
/// All populated arrays are parallel, one entry per input frame. Optional
/// arrays are `Some` only for the detection modes that define them
/// (`threshold` and `sustained_impulses` belong to the spectral-flux mode);
/// `None` means "not defined for this mode", never "happened to be empty".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandResult {
    /// The band definition this result was computed for
    pub band: BandDefinition,

    /// Position of the band in the request's band list
    pub band_index: usize,

    /// STFT bin the band's target frequency mapped to (0 for degenerate input)
    pub bin_index: usize,

    /// Per-frame magnitudes at the mapped bin, after optional causal smoothing
    pub magnitudes: Vec<f32>,

    /// First derivative of the processed magnitude series
    pub derivatives: Vec<f32>,

    /// Second derivative of the processed magnitude series
    pub second_derivatives: Vec<f32>,

    /// Pre-normalization impulse strengths, 0 at non-impulse frames
    pub impulse_strengths: Vec<f32>,

    /// Z-score normalized impulse strengths for cross-band comparison
    pub normalized_impulse_strengths: Vec<f32>,

    /// Detection function the strengths were derived from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_function: Option<Vec<f32>>,

    /// Adaptive threshold series (spectral-flux mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Vec<f32>>,

    /// Sustained impulse strengths (spectral-flux mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustained_impulses: Option<Vec<f32>>,

    /// Frame timestamps in seconds: `i * hop_size / sample_rate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_times: Option<Vec<f32>>,
}

impl BandResult {
    /// Well-formed empty result for a degenerate band (no STFT bins)
    ///
    /// All arrays are empty and optional signals absent; the request as a
    /// whole still succeeds.
    pub fn empty(band: BandDefinition, band_index: usize) -> Self {
        Self {
            band,
            band_index,
            bin_index: 0,
            magnitudes: Vec::new(),
            derivatives: Vec::new(),
            second_derivatives: Vec::new(),
            impulse_strengths: Vec::new(),
            normalized_impulse_strengths: Vec::new(),
            detection_function: None,
            threshold: None,
            sustained_impulses: None,
            detection_times: None,
        }
    }
}
