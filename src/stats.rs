//! Windowed statistics primitives
//!
//! Allocation-light building blocks shared by the thresholding, smoothing,
//! and normalization stages: medians, moving median and MAD (Median Absolute
//! Deviation), trailing means, and population z-scores. All functions are
//! pure and operate on plain `f32` slices.

/// Numerical stability floor for standard deviations
const EPSILON: f32 = 1e-10;

/// Median of a slice
///
/// Sorts a scratch copy; even-length input averages the two middle values.
/// Returns 0.0 for an empty slice.
pub fn median(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    median_of_sorted(&sorted)
}

/// Median of an already sorted, non-empty slice
fn median_of_sorted(sorted: &[f32]) -> f32 {
    if sorted.len().is_multiple_of(2) {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) * 0.5
    } else {
        sorted[sorted.len() / 2]
    }
}

/// Clamped centered window bounds with floor/ceil half-widths
///
/// The window covers `[i - floor(w/2), i + ceil(w/2))` intersected with the
/// series, so boundary windows shrink and even window lengths lean one frame
/// toward the past.
fn centered_window(i: usize, window: usize, len: usize) -> (usize, usize) {
    let start = i.saturating_sub(window / 2);
    let end = (i + window.div_ceil(2)).min(len);
    (start, end)
}

/// Moving median over centered, boundary-clamped windows
///
/// A window of 0 is treated as 1. The window convention is shared with
/// [`moving_mad`]; adaptive thresholding depends on the two agreeing.
pub fn moving_median(values: &[f32], window: usize) -> Vec<f32> {
    let w = window.max(1);
    let mut scratch: Vec<f32> = Vec::with_capacity(w);
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let (start, end) = centered_window(i, w, values.len());

        scratch.clear();
        scratch.extend_from_slice(&values[start..end]);
        scratch.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        out.push(median_of_sorted(&scratch));
    }

    out
}

/// Moving MAD (Median Absolute Deviation) over centered windows
///
/// For each frame: take the window's median, then the median of the absolute
/// deviations from it. Windows match [`moving_median`] exactly.
pub fn moving_mad(values: &[f32], window: usize) -> Vec<f32> {
    let w = window.max(1);
    let mut window_scratch: Vec<f32> = Vec::with_capacity(w);
    let mut deviation_scratch: Vec<f32> = Vec::with_capacity(w);
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let (start, end) = centered_window(i, w, values.len());

        // Step 1: Median of the window
        window_scratch.clear();
        window_scratch.extend_from_slice(&values[start..end]);
        window_scratch.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let window_median = median_of_sorted(&window_scratch);

        // Step 2: Median of absolute deviations from it
        deviation_scratch.clear();
        deviation_scratch.extend(values[start..end].iter().map(|&v| (v - window_median).abs()));
        deviation_scratch.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        out.push(median_of_sorted(&deviation_scratch));
    }

    out
}

/// Trailing (causal) moving average
///
/// `out[i]` averages `values[i + 1 - w ..= i]`. The window shrinks near the
/// start of the series instead of centering or padding, so no future frame
/// leaks into a sample.
pub fn trailing_mean(values: &[f32], window: usize) -> Vec<f32> {
    let w = window.max(1);
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(w);
        let slice = &values[start..=i];
        let sum: f32 = slice.iter().sum();
        out.push(sum / slice.len() as f32);
    }

    out
}

/// Population mean and standard deviation
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / n;

    (mean, variance.sqrt())
}

/// Population z-score normalization with a floored standard deviation
///
/// A constant series (standard deviation 0) divides through the epsilon
/// floor instead of zero, so the output stays finite; an all-zero series
/// stays all-zero.
pub fn z_score(values: &[f32]) -> Vec<f32> {
    let (mean, std) = mean_std(values);
    let std = std.max(EPSILON);

    values.iter().map(|&v| (v - mean) / std).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        // Even length averages the two middle values: (2 + 3) / 2
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_median_empty_and_single() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[7.5]), 7.5);
    }

    #[test]
    fn test_moving_median_window_one_is_identity() {
        let values = vec![5.0, 1.0, 4.0, 2.0];
        assert_eq!(moving_median(&values, 1), values);
        // Window 0 is clamped to 1
        assert_eq!(moving_median(&values, 0), values);
    }

    #[test]
    fn test_moving_median_shrinks_at_boundaries() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let medians = moving_median(&values, 3);

        // i=0: window [0, 2) -> median of [1, 2] = 1.5
        assert_eq!(medians[0], 1.5);
        // i=2: full window [1, 4) -> median of [2, 3, 4] = 3
        assert_eq!(medians[2], 3.0);
        // i=4: window [3, 5) -> median of [4, 5] = 4.5
        assert_eq!(medians[4], 4.5);
    }

    #[test]
    fn test_moving_median_even_window_leans_toward_past() {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let medians = moving_median(&values, 4);

        // i=2: window [0, 4) -> median of [0, 1, 2, 3] = 1.5
        assert_eq!(medians[2], 1.5);
    }

    #[test]
    fn test_moving_mad_constant_series_is_zero() {
        let values = vec![2.0; 8];
        let mads = moving_mad(&values, 5);
        assert!(mads.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_moving_mad_known_window() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mads = moving_mad(&values, 5);

        // i=2: full window, median 3, deviations [2, 1, 0, 1, 2] -> MAD 1
        assert_eq!(mads[2], 1.0);
    }

    #[test]
    fn test_trailing_mean_shrinks_at_start() {
        let values = vec![2.0, 4.0, 6.0];
        let smoothed = trailing_mean(&values, 2);

        assert_eq!(smoothed, vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_trailing_mean_window_larger_than_series() {
        let values = vec![1.0, 2.0, 3.0];
        let smoothed = trailing_mean(&values, 10);

        // Every window clamps to the available prefix
        assert_eq!(smoothed, vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_mean_std_known_values() {
        let (mean, std) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-6);
        // Population std of this classic set is exactly 2
        assert!((std - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_z_score_normalizes_mean_and_std() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let normalized = z_score(&values);

        let (mean, std) = mean_std(&normalized);
        assert!(mean.abs() < 1e-5, "Normalized mean should be ~0, got {}", mean);
        assert!((std - 1.0).abs() < 1e-4, "Normalized std should be ~1, got {}", std);
    }

    #[test]
    fn test_z_score_constant_series_stays_finite() {
        let normalized = z_score(&[3.0; 6]);
        assert!(normalized.iter().all(|v| v.is_finite()));
        assert!(normalized.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_z_score_all_zero_stays_zero() {
        let normalized = z_score(&[0.0; 5]);
        assert!(normalized.iter().all(|&v| v == 0.0));
    }
}
