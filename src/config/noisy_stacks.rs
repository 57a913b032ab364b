// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Noisy stacks scenario configuration
//!
//! Times are in days and frequencies in cycles per day. The signal covers
//! `duration_days * stacks` days so that each stack spans `duration_days`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::scenario::PlotType;

/// Configuration of the noisy stacks scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoisyStacksConfig {
    /// Length of one stack in days
    #[serde(default = "default_duration_days")]
    pub duration_days: f64,

    /// Time between samples in minutes
    #[serde(default = "default_sample_interval_minutes")]
    pub sample_interval_minutes: f64,

    /// Exponent β of the `1/f^β` noise spectrum
    #[serde(default = "default_noise_exponent")]
    pub noise_exponent: f64,

    /// Multiplier applied to the unit-variance noise
    #[serde(default = "default_noise_level")]
    pub noise_level: f64,

    /// Number of stacks averaged together
    #[serde(default = "default_stacks")]
    pub stacks: usize,

    /// Tone frequencies in cycles per day
    #[serde(default = "default_frequencies_cpd")]
    pub frequencies_cpd: Vec<f64>,

    /// Amplitude plot scale requested from the presentation layer
    #[serde(default)]
    pub plot_type: PlotType,
}

fn default_duration_days() -> f64 {
    90.0
}

fn default_sample_interval_minutes() -> f64 {
    60.0
}

fn default_noise_exponent() -> f64 {
    1.0 // Pink noise
}

fn default_noise_level() -> f64 {
    1.0
}

fn default_stacks() -> usize {
    2
}

fn default_frequencies_cpd() -> Vec<f64> {
    vec![0.9, 1.0, 1.8, 1.9, 2.0]
}

impl Default for NoisyStacksConfig {
    fn default() -> Self {
        Self {
            duration_days: default_duration_days(),
            sample_interval_minutes: default_sample_interval_minutes(),
            noise_exponent: default_noise_exponent(),
            noise_level: default_noise_level(),
            stacks: default_stacks(),
            frequencies_cpd: default_frequencies_cpd(),
            plot_type: PlotType::Linear,
        }
    }
}

impl NoisyStacksConfig {
    /// Override fields with command line values when they are provided
    pub fn apply_args(
        &mut self,
        duration_days: Option<f64>,
        sample_interval_minutes: Option<f64>,
        noise_exponent: Option<f64>,
        noise_level: Option<f64>,
        stacks: Option<usize>,
        plot_type: Option<PlotType>,
    ) {
        if let Some(duration) = duration_days {
            debug!("Overriding noisy stacks duration from command line: {}", duration);
            self.duration_days = duration;
        }
        if let Some(interval) = sample_interval_minutes {
            debug!("Overriding noisy stacks sample interval from command line: {}", interval);
            self.sample_interval_minutes = interval;
        }
        if let Some(exponent) = noise_exponent {
            debug!("Overriding noise exponent from command line: {}", exponent);
            self.noise_exponent = exponent;
        }
        if let Some(level) = noise_level {
            debug!("Overriding noise level from command line: {}", level);
            self.noise_level = level;
        }
        if let Some(stacks) = stacks {
            debug!("Overriding number of stacks from command line: {}", stacks);
            self.stacks = stacks;
        }
        if let Some(plot_type) = plot_type {
            debug!("Overriding plot type from command line: {:?}", plot_type);
            self.plot_type = plot_type;
        }
    }
}
