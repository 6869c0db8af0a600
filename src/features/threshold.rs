//! Adaptive thresholding for the spectral-flux detection mode
//!
//! Thresholds the flux series against a moving median plus a multiple of the
//! moving MAD (Median Absolute Deviation), as recommended by McFee & Ellis
//! (2014) for robust onset selection, then enforces a minimum separation
//! between accepted impulses.

use crate::stats;

/// Compute the adaptive threshold series `median[i] + k_factor * MAD[i]`
///
/// Median and MAD use the same centered windows (floor/ceil half-widths,
/// shrinking at the series boundaries, see [`stats::moving_median`]), so the
/// threshold tracks the local flux level instead of a global statistic.
///
/// # Reference
///
/// McFee, B., & Ellis, D. P. W. (2014). Better Beat Tracking Through Robust Onset Aggregation.
/// *Proceedings of the International Society for Music Information Retrieval Conference*.
pub fn adaptive_threshold(flux: &[f32], window: usize, k_factor: f32) -> Vec<f32> {
    let medians = stats::moving_median(flux, window);
    let mads = stats::moving_mad(flux, window);

    medians
        .iter()
        .zip(mads.iter())
        .map(|(&median, &mad)| median + k_factor * mad)
        .collect()
}

/// Threshold the flux series and suppress closely spaced impulses
///
/// A frame is a candidate when its flux strictly exceeds the threshold.
/// Candidates are scanned in increasing frame order; one is accepted only
/// when at least `min_separation_frames` frames have passed since the
/// previously accepted impulse, and suppressed candidates stay 0. The
/// returned series holds the flux value at accepted frames and 0 elsewhere.
pub fn pick_impulses(flux: &[f32], threshold: &[f32], min_separation_frames: usize) -> Vec<f32> {
    let mut strengths = vec![0.0f32; flux.len()];
    let mut last_accepted: Option<usize> = None;
    let mut accepted = 0usize;

    for i in 0..flux.len() {
        // Threshold should be the same length as flux, but be safe
        let limit = threshold.get(i).copied().unwrap_or(f32::INFINITY);
        if flux[i] <= limit {
            continue;
        }

        let far_enough = match last_accepted {
            Some(last) => i - last >= min_separation_frames,
            None => true,
        };

        if far_enough {
            strengths[i] = flux[i];
            last_accepted = Some(i);
            accepted += 1;
        }
    }

    log::debug!(
        "Accepted {} impulses from {} frames (min separation {} frames)",
        accepted,
        flux.len(),
        min_separation_frames
    );

    strengths
}
