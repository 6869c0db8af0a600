//! Performance benchmarks for impulse detection

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use impulse_dsp::{detect_impulses, BandDefinition, DetectionConfig, DetectionMode};

/// Synthetic magnitude sequence with periodic spikes over a quiet floor
fn synthetic_sequence(num_frames: usize, num_bins: usize) -> Vec<Vec<f32>> {
    (0..num_frames)
        .map(|i| {
            (0..num_bins)
                .map(|bin| {
                    if (i * 31 + bin * 17) % 97 == 0 {
                        0.8
                    } else {
                        0.05 + 0.0001 * bin as f32
                    }
                })
                .collect()
        })
        .collect()
}

fn bench_detect_impulses(c: &mut Criterion) {
    // ~60 seconds at 44.1kHz with hop 512: 5168 frames of 1024 bins
    let frames = synthetic_sequence(5168, 1024);

    let bands = vec![
        BandDefinition::new("kick", 60.0, "#e53935"),
        BandDefinition::new("snare", 1800.0, "#fdd835"),
        BandDefinition::new("hats", 9000.0, "#42a5f5"),
    ];

    let flux_config = DetectionConfig::default();
    c.bench_function("detect_impulses_flux_60s_3_bands", |b| {
        b.iter(|| {
            let _ = detect_impulses(
                black_box(&frames),
                black_box(&bands),
                black_box(44100),
                black_box(512),
                black_box(flux_config.clone()),
            );
        });
    });

    let zscore_config = DetectionConfig {
        mode: DetectionMode::ZScore,
        ..DetectionConfig::default()
    };
    c.bench_function("detect_impulses_zscore_60s_3_bands", |b| {
        b.iter(|| {
            let _ = detect_impulses(
                black_box(&frames),
                black_box(&bands),
                black_box(44100),
                black_box(512),
                black_box(zscore_config.clone()),
            );
        });
    });
}

criterion_group!(benches, bench_detect_impulses);
criterion_main!(benches);
