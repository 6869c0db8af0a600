//! # Impulse DSP
//!
//! A per-band impulse detection engine for precomputed STFT magnitude
//! sequences, providing onset picking with adaptive thresholding,
//! derivative-based detection functions, and sustain classification.
//!
//! ## Features
//!
//! - **Spectral Flux**: Half-wave rectified magnitude flux with moving
//!   median + MAD adaptive thresholding and minimum-separation suppression
//! - **Derivative Modes**: First/second derivative and z-score detection
//!   functions under three interchangeable estimators
//! - **Sustain Classification**: Separates held events from brief clicks
//! - **Cross-Band Normalization**: Z-scored impulse strengths per band
//!
//! ## Quick Start
//!
//! ```
//! use impulse_dsp::{detect_impulses, BandDefinition, DetectionConfig};
//!
//! // STFT magnitude frames (computed elsewhere): 4 frames x 8 bins
//! let frames = vec![vec![0.0f32; 8]; 4];
//! let bands = vec![BandDefinition::new("kick", 60.0, "#e53935")];
//!
//! let results = detect_impulses(&frames, &bands, 44100, 512, DetectionConfig::default())?;
//!
//! println!("Band {}: {} frames analyzed", results[0].band.name, results[0].magnitudes.len());
//! # Ok::<(), impulse_dsp::DetectionError>(())
//! ```
//!
//! ## Architecture
//!
//! The detection pipeline follows this flow per band:
//!
//! ```text
//! Bin Mapping → Magnitude Extraction → Smoothing → Derivatives → Detection Function → Normalization
//! ```
//!
//! The engine is a pure function of its inputs: no internal state, no I/O,
//! no clocks. Dispatch, progress reporting, and cancellation belong to the
//! calling layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod band;
pub mod config;
pub mod error;
pub mod features;
pub mod stats;

// Re-export main types
pub use analysis::result::BandResult;
pub use band::BandDefinition;
pub use config::{
    DerivativeEstimator, DetectionConfig, DetectionMode, SpectralFluxConfig, SustainConfig,
};
pub use error::DetectionError;

/// Main detection function
///
/// Runs the per-band pipeline over a precomputed STFT magnitude sequence and
/// returns one result per band, in the order the bands were given. The bin
/// count is taken from the first frame; shorter frames read as silence at
/// the mapped bin, and a sequence with 0 bins yields well-formed empty
/// results rather than an error.
///
/// # Arguments
///
/// * `fft_sequence` - STFT magnitude frames, outer index is time
/// * `bands` - Frequency bands to analyze, order is preserved in the output
/// * `sample_rate` - Sample rate in Hz of the audio the STFT came from
/// * `hop_size` - STFT hop size in samples
/// * `config` - Detection configuration parameters
///
/// # Returns
///
/// One [`BandResult`] per band with parallel per-frame arrays
///
/// # Errors
///
/// Returns [`DetectionError::InvalidInput`] for an empty frame sequence, a
/// sample rate of 0, or a hop size of 0
///
/// # Example
///
/// ```
/// use impulse_dsp::{detect_impulses, BandDefinition, DetectionConfig, DetectionMode};
///
/// let frames = vec![vec![0.1f32; 16]; 100];
/// let bands = vec![
///     BandDefinition::new("kick", 60.0, "#e53935"),
///     BandDefinition::new("hats", 9000.0, "#42a5f5"),
/// ];
/// let config = DetectionConfig {
///     mode: DetectionMode::SpectralFlux,
///     ..DetectionConfig::default()
/// };
///
/// let results = detect_impulses(&frames, &bands, 44100, 512, config)?;
/// assert_eq!(results.len(), 2);
/// # Ok::<(), impulse_dsp::DetectionError>(())
/// ```
pub fn detect_impulses(
    fft_sequence: &[Vec<f32>],
    bands: &[BandDefinition],
    sample_rate: u32,
    hop_size: usize,
    config: DetectionConfig,
) -> Result<Vec<BandResult>, DetectionError> {
    log::debug!(
        "Starting impulse detection: {} frames, {} bands, mode {:?}",
        fft_sequence.len(),
        bands.len(),
        config.mode
    );

    if fft_sequence.is_empty() {
        return Err(DetectionError::InvalidInput(
            "Empty FFT sequence".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(DetectionError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }

    if hop_size == 0 {
        return Err(DetectionError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    // Bin count comes from the first frame
    let num_bins = fft_sequence[0].len();

    let results: Vec<BandResult> = bands
        .iter()
        .enumerate()
        .map(|(band_index, band)| {
            analysis::pipeline::analyze_band(
                fft_sequence,
                band,
                band_index,
                num_bins,
                sample_rate,
                hop_size,
                &config,
            )
        })
        .collect();

    log::debug!("Impulse detection finished: {} band results", results.len());

    Ok(results)
}
