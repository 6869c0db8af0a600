//! Discrete derivative estimators
//!
//! Derivatives run on the processed magnitude series: the (smoothed) per-bin
//! magnitudes, optionally log-compressed. Three estimators share one window
//! parameter `W`; frames within `W` of the relevant boundary are defined as
//! 0 rather than extrapolated, so a flat edge is an edge, not a measurement.

use crate::config::DerivativeEstimator;

/// Floor applied before `log10` so silence stays finite
const LOG_FLOOR: f32 = 1e-8;

/// Map a magnitude series into the domain derivatives are taken in
///
/// With `log_domain` the series becomes `log10(max(m, 1e-8))`, which
/// approximates perceptual loudness and keeps silent frames finite.
/// Otherwise the series is copied unchanged.
pub fn processed_magnitudes(magnitudes: &[f32], log_domain: bool) -> Vec<f32> {
    if log_domain {
        magnitudes.iter().map(|&m| m.max(LOG_FLOOR).log10()).collect()
    } else {
        magnitudes.to_vec()
    }
}

/// Discrete derivative of a series
///
/// The window `W` is clamped to at least 1. Per estimator:
/// - `Forward`: `d[i] = x[i] - x[i-W]` for `i >= W`
/// - `Centered`: `d[i] = (x[i+W] - x[i-W]) / (2W)` for `W <= i < len - W`
/// - `MovingAverage`: mean over `w = 1..=W` of `x[i-w+1] - x[i-w]` for `i >= W`
///
/// The second derivative used by the detection stage is this function
/// applied twice with the same estimator and window.
pub fn differentiate(series: &[f32], estimator: DerivativeEstimator, window: usize) -> Vec<f32> {
    let w = window.max(1);
    let len = series.len();
    let mut out = vec![0.0f32; len];

    match estimator {
        DerivativeEstimator::Forward => {
            for i in w..len {
                out[i] = series[i] - series[i - w];
            }
        }
        DerivativeEstimator::Centered => {
            for i in w..len.saturating_sub(w) {
                out[i] = (series[i + w] - series[i - w]) / (2.0 * w as f32);
            }
        }
        DerivativeEstimator::MovingAverage => {
            for i in w..len {
                let mut sum = 0.0f32;
                for step in 1..=w {
                    sum += series[i - step + 1] - series[i - step];
                }
                out[i] = sum / w as f32;
            }
        }
    }

    out
}
