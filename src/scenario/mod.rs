// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Scenario drivers
//!
//! Each scenario turns validated parameters into a time series and its
//! spectra:
//!
//! - **Stacked sines**: a sum of unit tones given by their periods in minutes
//! - **Noisy stacks**: tones in cycles per day buried in coloured noise,
//!   analysed before and after stack averaging
//! - **Swept sines**: a linear or exponential sweep between two periods
//!
//! The drivers hold no state; plotting is left to whoever consumes the
//! [`ScenarioOutput`].

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{NoisyStacksConfig, SineStacksConfig, SineSweepsConfig};
use crate::error::Result;
use crate::spectral::{compute_spectrum, create_spectral_analyzer, Spectrum};
use crate::signal::SampledSignal;
use crate::synthesis::{
    half_open_time_grid, inclusive_time_grid, noisy_tone_sum, tone_sum, SweepSpec, Tone,
};
use crate::utility::NoiseGenerator;

const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 60.0 * 24.0;

/// How the amplitude spectrum is meant to be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlotType {
    /// Linear amplitude against linear frequency
    #[default]
    Linear,
    /// Log amplitude against log frequency
    LogLog,
    /// Linear amplitude against log period
    SemilogPeriod,
}

/// A spectrum with the name of the series it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSpectrum {
    pub label: String,
    pub spectrum: Spectrum,
}

/// Arrays produced by one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub scenario: String,
    pub generated_at: DateTime<Utc>,
    pub time_unit: String,
    pub frequency_unit: String,
    pub plot_type: PlotType,
    pub time: Vec<f64>,
    pub signal: Vec<f64>,
    pub spectra: Vec<LabeledSpectrum>,
}

impl ScenarioOutput {
    /// Spectrum with the given label, if present
    pub fn spectrum(&self, label: &str) -> Option<&Spectrum> {
        self.spectra
            .iter()
            .find(|s| s.label == label)
            .map(|s| &s.spectrum)
    }
}

/// A runnable demonstration
pub trait Scenario {
    /// Short machine-friendly name
    fn name(&self) -> &'static str;

    /// Synthesize the signal and compute its spectra.
    ///
    /// `generator` is only drawn from by scenarios that add noise.
    fn run(&self, generator: &mut NoiseGenerator) -> Result<ScenarioOutput>;
}

fn labeled(label: &str, spectrum: Spectrum) -> LabeledSpectrum {
    LabeledSpectrum {
        label: label.to_string(),
        spectrum,
    }
}

impl Scenario for SineStacksConfig {
    fn name(&self) -> &'static str {
        "sine_stacks"
    }

    fn run(&self, _generator: &mut NoiseGenerator) -> Result<ScenarioOutput> {
        let step = self.sample_interval_seconds / SECONDS_PER_MINUTE;
        let sample_rate = 1.0 / step;
        let time = inclusive_time_grid(self.duration_minutes, step)?;

        let tones: Vec<Tone> = self
            .periods_minutes
            .iter()
            .map(|&period| Tone::from_period(period))
            .collect();
        let signal = tone_sum(&tones, &time);
        info!(
            "Stacked sines: {} tones, {} samples at {} per minute",
            tones.len(),
            signal.len(),
            sample_rate
        );

        let spectrum = compute_spectrum(&signal, sample_rate)?;

        Ok(ScenarioOutput {
            scenario: self.name().to_string(),
            generated_at: Utc::now(),
            time_unit: "minutes".to_string(),
            frequency_unit: "cycles per minute".to_string(),
            plot_type: PlotType::SemilogPeriod,
            time,
            signal,
            spectra: vec![labeled("raw", spectrum)],
        })
    }
}

impl Scenario for NoisyStacksConfig {
    fn name(&self) -> &'static str {
        "noisy_stacks"
    }

    fn run(&self, generator: &mut NoiseGenerator) -> Result<ScenarioOutput> {
        let step = self.sample_interval_minutes / MINUTES_PER_DAY;
        let duration = self.duration_days * self.stacks as f64;
        let time = half_open_time_grid(duration, step)?;

        let tones: Vec<Tone> = self
            .frequencies_cpd
            .iter()
            .map(|&frequency| Tone::new(frequency))
            .collect();
        let signal = noisy_tone_sum(
            &tones,
            &time,
            self.noise_exponent,
            self.noise_level,
            generator,
        )?;
        info!(
            "Noisy stacks: {} samples, exponent {}, level {}, {} stacks",
            signal.len(),
            self.noise_exponent,
            self.noise_level,
            self.stacks
        );

        let mut analyzer = create_spectral_analyzer();
        let raw_signal = SampledSignal::new(signal, step)?;
        let raw = analyzer.analyze(raw_signal.samples(), raw_signal.sample_rate())?;
        let stacked_signal = raw_signal.stack(self.stacks)?;
        debug!(
            "Stacked to {} samples at {} per day",
            stacked_signal.len(),
            stacked_signal.sample_rate()
        );
        let stacked = analyzer.analyze(stacked_signal.samples(), stacked_signal.sample_rate())?;

        Ok(ScenarioOutput {
            scenario: self.name().to_string(),
            generated_at: Utc::now(),
            time_unit: "days".to_string(),
            frequency_unit: "cycles per day".to_string(),
            plot_type: self.plot_type,
            time,
            signal: raw_signal.into_samples(),
            spectra: vec![labeled("raw", raw), labeled("stacked", stacked)],
        })
    }
}

impl Scenario for SineSweepsConfig {
    fn name(&self) -> &'static str {
        "sine_sweeps"
    }

    fn run(&self, _generator: &mut NoiseGenerator) -> Result<ScenarioOutput> {
        let step = self.sample_interval_seconds / SECONDS_PER_MINUTE;
        let sample_rate = 1.0 / step;
        let sweep = SweepSpec::new(
            self.start_period_minutes,
            self.end_period_minutes,
            self.sweep_type,
            self.duration_minutes,
        )?;
        let time = inclusive_time_grid(self.duration_minutes, step)?;
        let signal = sweep.synthesize(&time)?;
        info!(
            "Swept sines: {} sweep from {} to {} minutes, {} samples",
            sweep.kind,
            sweep.start_period,
            sweep.end_period,
            signal.len()
        );

        let spectrum = compute_spectrum(&signal, sample_rate)?;

        Ok(ScenarioOutput {
            scenario: self.name().to_string(),
            generated_at: Utc::now(),
            time_unit: "minutes".to_string(),
            frequency_unit: "cycles per minute".to_string(),
            plot_type: PlotType::SemilogPeriod,
            time,
            signal,
            spectra: vec![labeled("raw", spectrum)],
        })
    }
}
