//! Sustained impulse classification
//!
//! Separates held events from brief clicks: an accepted impulse counts as
//! sustained when the raw magnitude stays at its onset level for a run of
//! following frames. The classifier reads the raw, pre-smoothing magnitudes
//! so smoothing cannot fake stability.

use crate::config::SustainConfig;

/// Floor applied before `log10` so silence stays finite (-160 dB)
const LOG_FLOOR: f32 = 1e-8;

/// Tolerance when comparing look-ahead magnitudes against the onset level
const HOLD_TOLERANCE: f32 = 1e-6;

/// Magnitude to decibels with a silence floor
fn magnitude_db(magnitude: f32) -> f32 {
    20.0 * magnitude.max(LOG_FLOOR).log10()
}

/// Classify accepted impulses as sustained
///
/// For each frame with a positive impulse strength the classifier requires,
/// all against the raw magnitudes:
/// - level strictly above `min_db`
/// - a dB rise over the previous frame strictly above `min_db_delta`
///   (frame 0 has no previous frame and skips this gate)
/// - the magnitude holding at `raw[i] - 1e-6` or higher across the next
///   `duration_frames` frames, clamped to the end of the series
///
/// Qualifying frames copy their impulse strength into the returned array;
/// every other entry is 0. The array is additive to the impulse strengths,
/// never a replacement: `sustained[i] > 0` implies `strengths[i] > 0`.
pub fn classify_sustained(
    raw_magnitudes: &[f32],
    impulse_strengths: &[f32],
    config: &SustainConfig,
) -> Vec<f32> {
    let mut sustained = vec![0.0f32; impulse_strengths.len()];
    let mut count = 0usize;

    for i in 0..impulse_strengths.len() {
        if impulse_strengths[i] <= 0.0 {
            continue;
        }

        let level = raw_magnitudes.get(i).copied().unwrap_or(0.0);
        let level_db = magnitude_db(level);

        // Gate 1: Absolute level
        if level_db <= config.min_db {
            continue;
        }

        // Gate 2: Rise over the previous frame
        if i > 0 {
            let rise_db = level_db - magnitude_db(raw_magnitudes[i - 1]);
            if rise_db <= config.min_db_delta {
                continue;
            }
        }

        // Gate 3: Level holds across the look-ahead window
        let hold_end = (i + config.duration_frames).min(raw_magnitudes.len().saturating_sub(1));
        let holds = (i + 1..=hold_end).all(|j| raw_magnitudes[j] >= level - HOLD_TOLERANCE);

        if holds {
            sustained[i] = impulse_strengths[i];
            count += 1;
        }
    }

    log::debug!("Classified {} impulses as sustained", count);

    sustained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_duration(duration_frames: usize) -> SustainConfig {
        SustainConfig {
            min_db: -60.0,
            min_db_delta: 3.0,
            duration_frames,
        }
    }

    #[test]
    fn test_held_impulse_is_sustained() {
        // Quiet floor, then a step to 0.5 that holds
        let mut raw = vec![0.01f32; 25];
        for value in raw.iter_mut().skip(10) {
            *value = 0.5;
        }
        let mut strengths = vec![0.0f32; 25];
        strengths[10] = 1.7;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(10));

        assert_eq!(sustained[10], 1.7);
        assert_eq!(sustained.iter().filter(|&&s| s > 0.0).count(), 1);
    }

    #[test]
    fn test_decaying_impulse_is_not_sustained() {
        let mut raw = vec![0.01f32; 25];
        raw[10] = 0.5;
        raw[11] = 0.3;
        raw[12] = 0.1;
        let mut strengths = vec![0.0f32; 25];
        strengths[10] = 1.7;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(10));

        assert!(sustained.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_quiet_impulse_fails_the_level_gate() {
        // 1e-4 is -80 dB, below the -60 dB gate
        let mut raw = vec![1e-6f32; 20];
        for value in raw.iter_mut().skip(5) {
            *value = 1e-4;
        }
        let mut strengths = vec![0.0f32; 20];
        strengths[5] = 0.9;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(5));

        assert!(sustained.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_small_rise_fails_the_delta_gate() {
        // 0.4 -> 0.5 is a 1.94 dB rise, below the 3 dB gate
        let mut raw = vec![0.4f32; 20];
        for value in raw.iter_mut().skip(8) {
            *value = 0.5;
        }
        let mut strengths = vec![0.0f32; 20];
        strengths[8] = 0.2;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(5));

        assert!(sustained.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_first_frame_skips_the_rise_gate() {
        let raw = vec![0.5f32; 15];
        let mut strengths = vec![0.0f32; 15];
        strengths[0] = 1.1;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(5));

        assert_eq!(sustained[0], 1.1);
    }

    #[test]
    fn test_lookahead_clamps_at_series_end() {
        // Impulse near the end: only the remaining frames are checked
        let mut raw = vec![0.01f32; 12];
        raw[10] = 0.5;
        raw[11] = 0.5;
        let mut strengths = vec![0.0f32; 12];
        strengths[10] = 1.5;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(10));

        assert_eq!(sustained[10], 1.5);
    }

    #[test]
    fn test_zero_duration_is_vacuous() {
        // Any impulse passing the dB gates counts, even if it decays next frame
        let mut raw = vec![0.01f32; 20];
        raw[10] = 0.5;
        let mut strengths = vec![0.0f32; 20];
        strengths[10] = 2.0;

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(0));

        assert_eq!(sustained[10], 2.0);
    }

    #[test]
    fn test_sustained_is_a_subset_of_impulses() {
        let raw: Vec<f32> = (0..30).map(|i| if i >= 12 { 0.6 } else { 0.02 }).collect();
        let strengths: Vec<f32> = (0..30).map(|i| if i % 6 == 0 { 0.5 } else { 0.0 }).collect();

        let sustained = classify_sustained(&raw, &strengths, &config_with_duration(8));

        for i in 0..30 {
            if sustained[i] > 0.0 {
                assert!(strengths[i] > 0.0, "Sustained frame {} has no impulse", i);
                assert_eq!(sustained[i], strengths[i]);
            }
        }
    }
}
