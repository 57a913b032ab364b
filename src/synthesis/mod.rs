// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Waveform synthesis module
//!
//! This module produces the sampled test signals: time grids, sums of
//! fixed tones, linear and exponential sweeps, and additive coloured noise.

pub mod grid;
pub mod waveform;
#[cfg(test)]
mod waveform_test;

pub use grid::{
    half_open_sample_count, half_open_time_grid, inclusive_sample_count, inclusive_time_grid,
};
pub use waveform::{
    add_noise, exponential_chirp, linear_chirp, tone_sum, SweepKind, SweepSpec, Tone,
};

use crate::error::Result;
use crate::utility::NoiseGenerator;

/// Sum of `tones` on `times` plus `noise_level` times power-law noise of
/// exponent `noise_exponent` drawn from `generator`.
pub fn noisy_tone_sum(
    tones: &[Tone],
    times: &[f64],
    noise_exponent: f64,
    noise_level: f64,
    generator: &mut NoiseGenerator,
) -> Result<Vec<f64>> {
    let clean = tone_sum(tones, times);
    let noise = generator.colored(times.len(), noise_exponent)?;
    add_noise(&clean, &noise, noise_level)
}
