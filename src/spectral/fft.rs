// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Single-sided DFT for spectral analysis
//!
//! [`compute_spectrum`] plans a fresh FFT on every call. [`DftAnalyzer`]
//! keeps its plans by length and is meant for repeated analysis, such as
//! the raw and stacked spectra of one noisy run.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

use log::debug;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// Trait for implementing spectral analysis
pub trait SpectralAnalyzer {
    /// Analyze the given signal and extract its single-sided spectrum
    fn analyze(&mut self, signal: &[f64], sample_rate: f64) -> Result<Spectrum>;

    /// Get the amplitude of the bin closest to the specified frequency
    fn amplitude_at(&self, frequency: f64) -> Result<f64>;
}

/// Single-sided amplitude and phase spectrum of a real sequence.
///
/// The three vectors are parallel and hold `⌊N/2⌋` bins for an input of
/// `N` samples. Bin `i` sits at `sample_rate * i / N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
    pub phases: Vec<f64>,
    pub sample_rate: f64,
    /// Length of the analyzed signal
    pub signal_len: usize,
}

/// A local maximum of the amplitude spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralPeak {
    pub bin: usize,
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
}

impl Spectrum {
    /// Number of frequency bins
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Spacing between adjacent bins
    pub fn resolution(&self) -> f64 {
        self.sample_rate / self.signal_len as f64
    }

    /// Period of every bin (1/f); the DC bin maps to infinity.
    pub fn periods(&self) -> Vec<f64> {
        self.frequencies
            .iter()
            .map(|&f| if f == 0.0 { f64::INFINITY } else { 1.0 / f })
            .collect()
    }

    /// Index of the bin closest to `frequency`, if it lies inside the spectrum
    pub fn nearest_bin(&self, frequency: f64) -> Option<usize> {
        if self.is_empty() || !frequency.is_finite() || frequency < 0.0 {
            return None;
        }
        let bin = (frequency / self.resolution()).round() as usize;
        (bin < self.len()).then_some(bin)
    }

    /// Up to `count` strongest local maxima, sorted by decreasing amplitude.
    ///
    /// The DC bin is skipped; a bin is a maximum when it is not lower than
    /// either neighbour.
    pub fn peaks(&self, count: usize) -> Vec<SpectralPeak> {
        let a = &self.amplitudes;
        let mut peaks: Vec<SpectralPeak> = (1..a.len())
            .filter(|&i| {
                let left = a[i - 1];
                let right = a.get(i + 1).copied().unwrap_or(f64::NEG_INFINITY);
                a[i] > 0.0 && a[i] >= left && a[i] >= right
            })
            .map(|i| SpectralPeak {
                bin: i,
                frequency: self.frequencies[i],
                amplitude: a[i],
                phase: self.phases[i],
            })
            .collect();

        peaks.sort_by(|x, y| y.amplitude.total_cmp(&x.amplitude));
        peaks.truncate(count);
        peaks
    }
}

/// Compute the single-sided spectrum of `signal` sampled at `sample_rate`.
///
/// Coefficients are divided by `⌊N/2⌋` so that a unit-amplitude sinusoid
/// reads as amplitude 1.0. Only the first `⌊N/2⌋` bins are kept, which
/// drops the Nyquist bin for even `N`.
///
/// # Examples
///
/// ```
/// use stacked_sines::spectral::compute_spectrum;
///
/// let n = 64;
/// let fs = 64.0;
/// let tone: Vec<f64> = (0..n)
///     .map(|i| (2.0 * std::f64::consts::PI * 4.0 * i as f64 / fs).sin())
///     .collect();
/// let spectrum = compute_spectrum(&tone, fs).unwrap();
/// assert_eq!(spectrum.len(), 32);
/// assert!((spectrum.amplitudes[4] - 1.0).abs() < 1e-9);
/// ```
pub fn compute_spectrum(signal: &[f64], sample_rate: f64) -> Result<Spectrum> {
    let fft = FftPlanner::<f64>::new().plan_fft_forward(signal.len().max(1));
    spectrum_with_plan(signal, sample_rate, fft.as_ref())
}

fn spectrum_with_plan(signal: &[f64], sample_rate: f64, fft: &dyn Fft<f64>) -> Result<Spectrum> {
    let n = signal.len();
    if n < 2 {
        return Err(SignalError::invalid(format!(
            "spectrum needs at least 2 samples, got {}",
            n
        )));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(SignalError::invalid(format!(
            "sample rate must be finite and positive, got {}",
            sample_rate
        )));
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    let useful_bins = n / 2;
    let scale = useful_bins as f64;
    debug!(
        "DFT of {} samples at {} -> {} bins",
        n, sample_rate, useful_bins
    );

    let mut frequencies = Vec::with_capacity(useful_bins);
    let mut amplitudes = Vec::with_capacity(useful_bins);
    let mut phases = Vec::with_capacity(useful_bins);

    for (i, &coefficient) in buffer.iter().take(useful_bins).enumerate() {
        let z = coefficient / scale;
        frequencies.push(sample_rate * i as f64 / n as f64);
        amplitudes.push(z.norm());
        phases.push(canonical_phase(z));
    }

    Ok(Spectrum {
        frequencies,
        amplitudes,
        phases,
        sample_rate,
        signal_len: n,
    })
}

/// Argument of `z` restricted to (−π, π]; zero maps to 0.
fn canonical_phase(z: Complex64) -> f64 {
    if z.re == 0.0 && z.im == 0.0 {
        return 0.0;
    }
    let phase = z.arg();
    if phase <= -PI {
        PI
    } else {
        phase
    }
}

/// DFT analyzer that keeps FFT plans and the last spectrum between calls
pub struct DftAnalyzer {
    planner: FftPlanner<f64>,
    plans: HashMap<usize, Arc<dyn Fft<f64>>>,
    spectrum: Option<Spectrum>,
}

impl DftAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            plans: HashMap::new(),
            spectrum: None,
        }
    }

    /// Spectrum produced by the last successful `analyze` call
    pub fn last_spectrum(&self) -> Option<&Spectrum> {
        self.spectrum.as_ref()
    }

    fn plan(&mut self, len: usize) -> Arc<dyn Fft<f64>> {
        let planner = &mut self.planner;
        self.plans
            .entry(len)
            .or_insert_with(|| planner.plan_fft_forward(len))
            .clone()
    }
}

impl Default for DftAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralAnalyzer for DftAnalyzer {
    fn analyze(&mut self, signal: &[f64], sample_rate: f64) -> Result<Spectrum> {
        let fft = self.plan(signal.len().max(1));
        let spectrum = spectrum_with_plan(signal, sample_rate, fft.as_ref())?;
        self.spectrum = Some(spectrum.clone());
        Ok(spectrum)
    }

    fn amplitude_at(&self, frequency: f64) -> Result<f64> {
        let spectrum = self.spectrum.as_ref().ok_or_else(|| {
            SignalError::invalid("no spectrum available, call analyze() first")
        })?;

        let bin = spectrum.nearest_bin(frequency).ok_or_else(|| {
            SignalError::invalid(format!(
                "frequency {} is outside the analyzed spectrum",
                frequency
            ))
        })?;

        Ok(spectrum.amplitudes[bin])
    }
}
