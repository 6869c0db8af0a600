//! Example: Detect per-band impulses in a synthesized drum loop
//!
//! Synthesizes a two-second kick/hat pattern, computes an STFT magnitude
//! sequence with rustfft, and runs the detection engine over three bands.
//!
//! Usage:
//!   cargo run --release --example detect_band_impulses -- [--json]
//!
//! - Default output is one human-readable block per band
//! - `--json` emits one JSON object per band per line (JSONL)

use impulse_dsp::{detect_impulses, BandDefinition, BandResult, DetectionConfig};
use rustfft::{num_complex::Complex, FftPlanner};

const SAMPLE_RATE: u32 = 44100;
const FFT_SIZE: usize = 1024;
const HOP_SIZE: usize = 512;

/// Synthesize a two-second loop: 55 Hz kicks on the half second, short
/// 9 kHz hat ticks on the off-beats
fn synth_drum_loop() -> Vec<f32> {
    let num_samples = 2 * SAMPLE_RATE as usize;
    let mut samples = vec![0.0f32; num_samples];

    for (start_time, freq, amplitude, decay, length) in [
        (0.25f32, 55.0f32, 0.8f32, 30.0f32, 0.15f32),
        (0.75, 55.0, 0.8, 30.0, 0.15),
        (1.25, 55.0, 0.8, 30.0, 0.15),
        (1.75, 55.0, 0.8, 30.0, 0.15),
        (0.5, 9000.0, 0.3, 120.0, 0.05),
        (1.0, 9000.0, 0.3, 120.0, 0.05),
        (1.5, 9000.0, 0.3, 120.0, 0.05),
    ] {
        let start = (start_time * SAMPLE_RATE as f32) as usize;
        let burst_len = (length * SAMPLE_RATE as f32) as usize;

        for i in 0..burst_len {
            let idx = start + i;
            if idx >= num_samples {
                break;
            }
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = amplitude * (-decay * t).exp();
            samples[idx] += envelope * (2.0 * std::f32::consts::PI * freq * t).sin();
        }
    }

    samples
}

/// Hann-windowed STFT magnitude sequence: `FFT_SIZE / 2` bins per frame
fn stft_magnitudes(samples: &[f32]) -> Vec<Vec<f32>> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);

    let num_bins = FFT_SIZE / 2;
    let num_frames = (samples.len() - FFT_SIZE) / HOP_SIZE + 1;

    let hann: Vec<f32> = (0..FFT_SIZE)
        .map(|n| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * n as f32 / FFT_SIZE as f32).cos())
        .collect();

    let mut frames = Vec::with_capacity(num_frames);
    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); FFT_SIZE];

    for frame_index in 0..num_frames {
        let start = frame_index * HOP_SIZE;
        for (slot, (&sample, &window)) in buffer
            .iter_mut()
            .zip(samples[start..start + FFT_SIZE].iter().zip(hann.iter()))
        {
            *slot = Complex::new(sample * window, 0.0);
        }
        fft.process(&mut buffer);

        frames.push(
            buffer[..num_bins]
                .iter()
                .map(|c| c.norm() / FFT_SIZE as f32)
                .collect(),
        );
    }

    frames
}

fn print_band_summary(result: &BandResult) {
    println!(
        "Band '{}' ({:.0} Hz -> bin {}):",
        result.band.name, result.band.target_frequency, result.bin_index
    );

    let times = result.detection_times.as_deref().unwrap_or(&[]);
    let sustained = result.sustained_impulses.as_deref().unwrap_or(&[]);

    let mut found = 0;
    for (frame, &strength) in result.impulse_strengths.iter().enumerate() {
        if strength <= 0.0 {
            continue;
        }
        found += 1;

        let time = times.get(frame).copied().unwrap_or(0.0);
        let tag = if sustained.get(frame).copied().unwrap_or(0.0) > 0.0 {
            ", sustained"
        } else {
            ""
        };
        println!(
            "  impulse at {:.3}s (frame {}, strength {:.2}{})",
            time, frame, strength, tag
        );
    }

    if found == 0 {
        println!("  no impulses");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let json = std::env::args().any(|arg| arg == "--json");

    let samples = synth_drum_loop();
    let frames = stft_magnitudes(&samples);
    eprintln!(
        "Synthesized {} samples -> {} frames x {} bins",
        samples.len(),
        frames.len(),
        frames.first().map(Vec::len).unwrap_or(0)
    );

    let bands = vec![
        BandDefinition::new("kick", 60.0, "#e53935"),
        BandDefinition::new("snare", 1800.0, "#fdd835"),
        BandDefinition::new("hats", 9000.0, "#42a5f5"),
    ];

    let results = detect_impulses(&frames, &bands, SAMPLE_RATE, HOP_SIZE, DetectionConfig::default())?;

    for result in &results {
        if json {
            println!("{}", serde_json::to_string(result)?);
        } else {
            print_band_summary(result);
        }
    }

    Ok(())
}
