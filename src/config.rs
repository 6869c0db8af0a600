//! Configuration parameters for impulse detection

use serde::{Deserialize, Serialize};

/// Detection function mode
///
/// Selects the per-frame signal that impulse strengths are derived from.
/// The pipeline dispatches on this once per band; optional result arrays
/// are populated only by the modes that define them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMode {
    /// Half-wave rectified frame-to-frame magnitude increase, with
    /// median + MAD adaptive thresholding and sustain classification
    SpectralFlux,

    /// Magnitude of the first derivative, gated by the raw-magnitude mask
    FirstDerivative,

    /// Magnitude of the second derivative, gated by the raw-magnitude mask
    SecondDerivative,

    /// Doubly z-normalized first derivative, gated by the raw-magnitude mask
    ZScore,
}

/// Discrete derivative estimator
///
/// All three share one window parameter `W` and define edge frames inside
/// the window as 0 rather than extrapolating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivativeEstimator {
    /// Trailing difference: `d[i] = x[i] - x[i-W]`
    Forward,

    /// Central difference: `d[i] = (x[i+W] - x[i-W]) / (2W)`
    Centered,

    /// Mean of the last `W` single-step differences
    MovingAverage,
}

/// Adaptive thresholding parameters for [`DetectionMode::SpectralFlux`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectralFluxConfig {
    /// Centered window length in frames for the moving median and MAD (default: 21)
    pub window: usize,

    /// MAD multiplier: `threshold = median + k_factor * MAD` (default: 2.0)
    pub k_factor: f32,

    /// Minimum number of frames between two accepted impulses (default: 3)
    pub min_separation_frames: usize,
}

impl Default for SpectralFluxConfig {
    fn default() -> Self {
        Self {
            window: 21,
            k_factor: 2.0,
            min_separation_frames: 3,
        }
    }
}

/// Sustain classification parameters ([`DetectionMode::SpectralFlux`] only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainConfig {
    /// Minimum level in dB for an impulse to qualify as sustained (default: -60.0)
    pub min_db: f32,

    /// Minimum dB rise over the previous frame (default: 3.0)
    pub min_db_delta: f32,

    /// Look-ahead length in frames; the raw magnitude must hold the impulse
    /// level across the whole window. 0 makes the look-ahead vacuous, so any
    /// impulse passing the dB gates counts as sustained (default: 10)
    pub duration_frames: usize,
}

impl Default for SustainConfig {
    fn default() -> Self {
        Self {
            min_db: -60.0,
            min_db_delta: 3.0,
            duration_frames: 10,
        }
    }
}

/// Detection configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    // Mode selection
    /// Detection function mode (default: SpectralFlux)
    pub mode: DetectionMode,

    /// Derivative estimator for the derivative-based modes (default: Centered)
    pub derivative_estimator: DerivativeEstimator,

    // Series conditioning
    /// Derivative window `W` in frames, at least 1 (default: 1)
    pub derivative_window_size: usize,

    /// Trailing moving-average window for magnitude smoothing, at least 1
    /// (default: 1 = no smoothing)
    pub smoothing_window_size: usize,

    /// Take derivatives and flux on `log10` magnitudes (default: true)
    pub log_domain: bool,

    // Spectral-flux mode
    /// Adaptive thresholding parameters
    pub spectral_flux: SpectralFluxConfig,

    /// Sustain classification parameters
    pub sustain: SustainConfig,

    // Derivative-based modes
    /// Raw-magnitude threshold for the silence mask (default: 1e-6)
    /// Frames at or below this magnitude contribute zero impulse strength
    pub min_magnitude_threshold: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::SpectralFlux,
            derivative_estimator: DerivativeEstimator::Centered,
            derivative_window_size: 1,
            smoothing_window_size: 1,
            log_domain: true,
            spectral_flux: SpectralFluxConfig::default(),
            sustain: SustainConfig::default(),
            min_magnitude_threshold: 1e-6,
        }
    }
}
