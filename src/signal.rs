// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Uniformly sampled real signals

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};
use crate::spectral::{compute_spectrum, Spectrum};
use crate::stacking::stack_and_average;

/// Real samples taken every `time_step` time units.
///
/// Always holds at least two samples and a finite, positive step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledSignal {
    samples: Vec<f64>,
    time_step: f64,
}

impl SampledSignal {
    pub fn new(samples: Vec<f64>, time_step: f64) -> Result<Self> {
        if samples.len() < 2 {
            return Err(SignalError::invalid(format!(
                "a sampled signal needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SignalError::invalid(format!(
                "time step must be finite and positive, got {}",
                time_step
            )));
        }
        Ok(Self { samples, time_step })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn sample_rate(&self) -> f64 {
        1.0 / self.time_step
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample times starting at 0
    pub fn times(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 * self.time_step)
            .collect()
    }

    /// Single-sided spectrum at this signal's sample rate
    pub fn spectrum(&self) -> Result<Spectrum> {
        compute_spectrum(&self.samples, self.sample_rate())
    }

    /// Stack-average into `stacks` epochs; the step grows by the same factor.
    pub fn stack(&self, stacks: usize) -> Result<SampledSignal> {
        let averaged = stack_and_average(&self.samples, stacks)?;
        SampledSignal::new(averaged, self.time_step * stacks as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_or_unsampled_signals() {
        assert!(SampledSignal::new(vec![1.0], 1.0).is_err());
        assert!(SampledSignal::new(vec![1.0, 2.0], 0.0).is_err());
        assert!(SampledSignal::new(vec![1.0, 2.0], f64::INFINITY).is_err());
    }

    #[test]
    fn test_stack_coarsens_time_step() {
        let signal = SampledSignal::new(vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0], 0.5).unwrap();
        let stacked = signal.stack(3).unwrap();
        assert_eq!(stacked.samples(), &[3.0, 9.0]);
        assert_eq!(stacked.time_step(), 1.5);
        assert!((stacked.sample_rate() - signal.sample_rate() / 3.0).abs() < 1e-12);

        // A single averaged sample is not a valid signal
        assert!(signal.stack(6).is_err());
    }

    #[test]
    fn test_spectrum_uses_sample_rate() {
        let signal = SampledSignal::new(vec![0.0, 1.0, 0.0, -1.0], 0.25).unwrap();
        let spectrum = signal.spectrum().unwrap();
        assert_eq!(spectrum.sample_rate, 4.0);
        assert_eq!(spectrum.frequencies, vec![0.0, 1.0]);
        assert_eq!(signal.times(), vec![0.0, 0.25, 0.5, 0.75]);
    }
}
