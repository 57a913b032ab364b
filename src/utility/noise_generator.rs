// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Coloured Noise Generator
//!
//! This module generates stationary Gaussian noise whose power spectral
//! density follows a power law `S(f) ∝ 1/f^β`:
//!
//! - `β = 0`: white noise (flat spectrum)
//! - `β = 1`: pink noise
//! - `β = 2`: red (Brownian) noise
//!
//! White Gaussian samples are transformed with a real FFT, shaped by the
//! normalised envelope `1/f^β` and transformed back. The envelope is scaled to
//! unit root-mean-square, so the output variance stays close to 1 whatever
//! the exponent, which keeps noise colours comparable at a fixed noise level.
//!
//! ## Examples
//!
//! ```rust
//! use stacked_sines::utility::noise_generator::NoiseGenerator;
//!
//! // Reproducible pink noise
//! let mut generator = NoiseGenerator::new(12345);
//! let pink = generator.colored(4096, 1.0).unwrap();
//! assert_eq!(pink.len(), 4096);
//! ```

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use realfft::RealFftPlanner;

use crate::error::{Result, SignalError};

/// Seeded source of white and coloured Gaussian noise.
///
/// The generator owns its random state; two generators built with the same
/// seed produce the same sequences.
pub struct NoiseGenerator {
    rng: StdRng,
}

impl NoiseGenerator {
    /// Creates a new noise generator with a given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stacked_sines::utility::noise_generator::NoiseGenerator;
    ///
    /// let mut a = NoiseGenerator::new(7);
    /// let mut b = NoiseGenerator::new(7);
    /// assert_eq!(a.white(16), b.white(16));
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a new noise generator seeded from operating system entropy.
    pub fn new_from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Draws `num_samples` independent standard-normal samples.
    pub fn white(&mut self, num_samples: usize) -> Vec<f64> {
        standard_normal(num_samples, &mut self.rng)
    }

    /// Draws `num_samples` of power-law noise with exponent `exponent`.
    ///
    /// See [`colored_noise`].
    pub fn colored(&mut self, num_samples: usize, exponent: f64) -> Result<Vec<f64>> {
        colored_noise(num_samples, exponent, &mut self.rng)
    }
}

fn standard_normal<R: Rng + ?Sized>(num_samples: usize, rng: &mut R) -> Vec<f64> {
    (0..num_samples)
        .map(|_| -> f64 { StandardNormal.sample(&mut *rng) })
        .collect()
}

/// Shaping envelope `1/f^β` over the `⌊n/2⌋ + 1` non-negative rfft bins.
///
/// Bin `k` sits at `k/n` cycles per sample. The DC bin is set to zero, which
/// removes any net drift from the shaped noise. The gains are built as
/// logarithms and rescaled to a peak of 1 before exponentiation, so they stay
/// finite for any finite `exponent`. The envelope is then divided by its
/// root-mean-square; when every value is zero (`n == 1`) it is returned
/// unscaled.
pub fn power_law_envelope(num_samples: usize, exponent: f64) -> Vec<f64> {
    let bins = num_samples / 2 + 1;
    let log_gains: Vec<f64> = (1..bins)
        .map(|k| -exponent * (k as f64 / num_samples as f64).ln())
        .collect();
    let peak = log_gains.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut envelope = Vec::with_capacity(bins);
    envelope.push(0.0);
    envelope.extend(log_gains.iter().map(|g| (g - peak).exp()));

    let mean_square = envelope.iter().map(|s| s * s).sum::<f64>() / bins as f64;
    let rms = mean_square.sqrt();
    if rms > 0.0 && rms.is_finite() {
        for s in envelope.iter_mut() {
            *s /= rms;
        }
    }
    envelope
}

/// Generates `num_samples` of coloured noise with power-law exponent `exponent`.
///
/// # Arguments
///
/// * `num_samples` - Output length, at least 1
/// * `exponent` - β in `S(f) ∝ 1/f^β` (0 white, 1 pink, 2 red)
/// * `rng` - Source of the underlying white Gaussian draw
///
/// # Errors
///
/// `InvalidArgument` when `num_samples` is 0 or `exponent` is not finite.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use stacked_sines::utility::noise_generator::colored_noise;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let red = colored_noise(1000, 2.0, &mut rng).unwrap();
/// assert_eq!(red.len(), 1000);
/// assert!(colored_noise(0, 2.0, &mut rng).is_err());
/// ```
pub fn colored_noise<R: Rng + ?Sized>(
    num_samples: usize,
    exponent: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if num_samples < 1 {
        return Err(SignalError::invalid("noise length must be at least 1"));
    }
    if !exponent.is_finite() {
        return Err(SignalError::invalid(format!(
            "noise exponent must be finite, got {}",
            exponent
        )));
    }

    let mut planner = RealFftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(num_samples);
    let inverse = planner.plan_fft_inverse(num_samples);

    let mut white = standard_normal(num_samples, rng);
    let mut spectrum = forward.make_output_vec();
    forward.process(&mut white, &mut spectrum)?;

    let envelope = power_law_envelope(num_samples, exponent);
    debug!(
        "Shaping {} rfft bins with exponent {}",
        envelope.len(),
        exponent
    );
    for (bin, &gain) in spectrum.iter_mut().zip(envelope.iter()) {
        *bin *= gain;
    }

    // The inverse real transform needs purely real DC and Nyquist bins
    spectrum[0].im = 0.0;
    if num_samples % 2 == 0 {
        if let Some(nyquist) = spectrum.last_mut() {
            nyquist.im = 0.0;
        }
    }

    let mut output = inverse.make_output_vec();
    inverse.process(&mut spectrum, &mut output)?;

    let scale = 1.0 / num_samples as f64;
    for sample in output.iter_mut() {
        *sample *= scale;
    }
    Ok(output)
}
