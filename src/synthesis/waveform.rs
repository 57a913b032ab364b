// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Deterministic waveforms: tone sums and frequency sweeps

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// A fixed sinusoid `amplitude * sin(2π f t)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency in cycles per unit time
    pub frequency: f64,
    pub amplitude: f64,
}

impl Tone {
    /// Unit-amplitude tone at `frequency` cycles per unit time
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            amplitude: 1.0,
        }
    }

    /// Unit-amplitude tone repeating every `period` time units
    pub fn from_period(period: f64) -> Self {
        Self::new(1.0 / period)
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Value of the tone at time `t`
    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t).sin()
    }
}

/// Sum of `tones` evaluated on `times`
pub fn tone_sum(tones: &[Tone], times: &[f64]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| tones.iter().map(|tone| tone.sample(t)).sum::<f64>())
        .collect()
}

/// How the instantaneous frequency moves between the sweep end points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SweepKind {
    /// Angular frequency changes by a constant amount per unit time
    #[default]
    Linear,
    /// Angular frequency changes by a constant ratio per unit time
    Exponential,
}

impl fmt::Display for SweepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepKind::Linear => write!(f, "linear"),
            SweepKind::Exponential => write!(f, "exponential"),
        }
    }
}

fn check_duration(duration: f64) -> Result<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SignalError::invalid(format!(
            "sweep duration must be finite and positive, got {}",
            duration
        )));
    }
    Ok(())
}

/// Linear chirp from angular frequency `w1` to `w2` over `duration`.
///
/// `phase(t) = w1 t + t² (w2 − w1) / (2T)`, output `sin(phase(t))`.
pub fn linear_chirp(times: &[f64], w1: f64, w2: f64, duration: f64) -> Result<Vec<f64>> {
    check_duration(duration)?;
    if !w1.is_finite() || !w2.is_finite() {
        return Err(SignalError::invalid("sweep frequencies must be finite"));
    }
    let rate = (w2 - w1) / (2.0 * duration);
    Ok(times
        .iter()
        .map(|&t| (w1 * t + t * t * rate).sin())
        .collect())
}

/// Exponential chirp from angular frequency `w1` to `w2` over `duration`.
///
/// `phase(t) = w1 T / ln(w2/w1) · exp(t/T · ln(w2/w1))`, output `sin(phase(t))`.
/// The instantaneous angular frequency is `w1` at `t = 0` and `w2` at `t = T`.
///
/// # Errors
///
/// `InvalidArgument` when `w2/w1` is not positive, when `w1 == w2` (the
/// logarithm of the ratio vanishes) or when the duration is not positive.
pub fn exponential_chirp(times: &[f64], w1: f64, w2: f64, duration: f64) -> Result<Vec<f64>> {
    check_duration(duration)?;
    let ratio = w2 / w1;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(SignalError::invalid(format!(
            "exponential sweep needs frequencies of the same sign, got {} and {}",
            w1, w2
        )));
    }
    if w1 == w2 {
        return Err(SignalError::invalid(format!(
            "exponential sweep needs distinct frequencies, got {} twice",
            w1
        )));
    }

    let log_ratio = ratio.ln();
    let scale = w1 * duration / log_ratio;
    Ok(times
        .iter()
        .map(|&t| (scale * (t / duration * log_ratio).exp()).sin())
        .collect())
}

/// Swept sine described by its start and end periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub start_period: f64,
    pub end_period: f64,
    pub kind: SweepKind,
    pub duration: f64,
}

impl SweepSpec {
    pub fn new(start_period: f64, end_period: f64, kind: SweepKind, duration: f64) -> Result<Self> {
        for period in [start_period, end_period] {
            if !period.is_finite() || period <= 0.0 {
                return Err(SignalError::invalid(format!(
                    "sweep periods must be finite and positive, got {}",
                    period
                )));
            }
        }
        check_duration(duration)?;
        if kind == SweepKind::Exponential && start_period == end_period {
            return Err(SignalError::invalid(
                "exponential sweep needs distinct start and end periods",
            ));
        }
        Ok(Self {
            start_period,
            end_period,
            kind,
            duration,
        })
    }

    /// Start and end angular frequencies
    pub fn angular_frequencies(&self) -> (f64, f64) {
        (2.0 * PI / self.start_period, 2.0 * PI / self.end_period)
    }

    /// Instantaneous frequency in cycles per unit time at `t`
    pub fn frequency_at(&self, t: f64) -> f64 {
        let (f1, f2) = (1.0 / self.start_period, 1.0 / self.end_period);
        match self.kind {
            SweepKind::Linear => f1 + (f2 - f1) * t / self.duration,
            SweepKind::Exponential => f1 * (f2 / f1).powf(t / self.duration),
        }
    }

    /// Sample the sweep on `times`
    pub fn synthesize(&self, times: &[f64]) -> Result<Vec<f64>> {
        let (w1, w2) = self.angular_frequencies();
        match self.kind {
            SweepKind::Linear => linear_chirp(times, w1, w2, self.duration),
            SweepKind::Exponential => exponential_chirp(times, w1, w2, self.duration),
        }
    }
}

/// `signal + level * noise`, element by element
pub fn add_noise(signal: &[f64], noise: &[f64], level: f64) -> Result<Vec<f64>> {
    if signal.len() != noise.len() {
        return Err(SignalError::invalid(format!(
            "noise length {} does not match signal length {}",
            noise.len(),
            signal.len()
        )));
    }
    Ok(signal
        .iter()
        .zip(noise)
        .map(|(s, n)| s + level * n)
        .collect())
}
