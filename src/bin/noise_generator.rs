// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Coloured noise generator for audio testing
// Writes 1/f^β noise to a mono 16-bit WAV file

use anyhow::{Context, Result};
use clap::Parser;
use hound::{SampleFormat, WavSpec, WavWriter};
use log::{debug, info};
use std::path::PathBuf;

use stacked_sines::utility::NoiseGenerator;

/// Coloured noise generator for audio testing
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file path (.wav)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Duration in seconds
    #[arg(short, long, default_value_t = 5.0)]
    duration: f64,

    /// Sample rate (44100, 48000, or 192000)
    #[arg(short, long, default_value_t = 48000)]
    sample_rate: u32,

    /// Peak amplitude of the noise (0.0 to 1.0)
    #[arg(short, long, default_value_t = 0.5)]
    amplitude: f64,

    /// Spectral exponent β (0 white, 1 pink, 2 red)
    #[arg(short, long, default_value_t = 1.0, allow_hyphen_values = true)]
    exponent: f64,

    /// Seed for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,
}

/// Scale `samples` so that the largest magnitude is `amplitude` and convert to i16
fn to_pcm(samples: &[f64], amplitude: f64) -> Vec<i16> {
    let peak = samples.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let scale = if peak > 0.0 {
        amplitude * i16::MAX as f64 / peak
    } else {
        0.0
    };
    samples
        .iter()
        .map(|x| (x * scale).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16)
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.sample_rate {
        44100 | 48000 | 192000 => {}
        _ => anyhow::bail!("Sample rate must be 44100, 48000, or 192000 Hz"),
    }
    if args.amplitude <= 0.0 || args.amplitude > 1.0 {
        anyhow::bail!("Amplitude must be between 0.0 and 1.0");
    }
    if !args.duration.is_finite() || args.duration <= 0.0 {
        anyhow::bail!("Duration must be a positive number of seconds");
    }

    let num_samples = (args.duration * args.sample_rate as f64).round() as usize;
    info!(
        "Generating {} seconds of 1/f^{} noise ({} samples at {} Hz)",
        args.duration, args.exponent, num_samples, args.sample_rate
    );

    let mut generator = match args.seed {
        Some(seed) => {
            debug!("Using seed {}", seed);
            NoiseGenerator::new(seed)
        }
        None => NoiseGenerator::new_from_entropy(),
    };
    let noise = generator
        .colored(num_samples, args.exponent)
        .context("Failed to synthesize noise")?;

    let spec = WavSpec {
        channels: 1,
        sample_rate: args.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&args.output, spec)
        .with_context(|| format!("Failed to create {:?}", args.output))?;
    for sample in to_pcm(&noise, args.amplitude) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    println!("Noise written to {}", args.output.display());
    Ok(())
}
