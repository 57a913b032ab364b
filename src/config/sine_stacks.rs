// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Stacked sines scenario configuration

use log::debug;
use serde::{Deserialize, Serialize};

/// Configuration of the stacked sines scenario.
///
/// Unit tones given by their periods are summed over an inclusive time grid
/// and analysed with a single DFT. Times are in minutes.
///
/// # Example
///
/// ```
/// use stacked_sines::config::SineStacksConfig;
///
/// let config = SineStacksConfig {
///     periods_minutes: vec![2.0, 7.0],
///     ..Default::default()
/// };
/// assert_eq!(config.duration_minutes, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SineStacksConfig {
    /// Test duration in minutes
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: f64,

    /// Time between samples in seconds
    #[serde(default = "default_sample_interval_seconds")]
    pub sample_interval_seconds: f64,

    /// Periods of the summed unit tones in minutes
    #[serde(default = "default_periods_minutes")]
    pub periods_minutes: Vec<f64>,
}

fn default_duration_minutes() -> f64 {
    60.0
}

fn default_sample_interval_seconds() -> f64 {
    1.0
}

fn default_periods_minutes() -> Vec<f64> {
    vec![1.0, 5.0, 10.0]
}

impl Default for SineStacksConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            sample_interval_seconds: default_sample_interval_seconds(),
            periods_minutes: default_periods_minutes(),
        }
    }
}

impl SineStacksConfig {
    /// Override fields with command line values when they are provided
    pub fn apply_args(
        &mut self,
        duration_minutes: Option<f64>,
        sample_interval_seconds: Option<f64>,
        periods_minutes: Option<Vec<f64>>,
    ) {
        if let Some(duration) = duration_minutes {
            debug!("Overriding stacked sines duration from command line: {}", duration);
            self.duration_minutes = duration;
        }
        if let Some(interval) = sample_interval_seconds {
            debug!("Overriding stacked sines sample interval from command line: {}", interval);
            self.sample_interval_seconds = interval;
        }
        if let Some(periods) = periods_minutes {
            debug!("Overriding stacked sines periods from command line: {:?}", periods);
            self.periods_minutes = periods;
        }
    }
}
