// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Swept sines scenario configuration

use log::debug;
use serde::{Deserialize, Serialize};

use crate::synthesis::SweepKind;

/// Configuration of the swept sines scenario.
///
/// The sweep runs from `start_period_minutes` to `end_period_minutes` over
/// the whole duration. An exponential sweep needs two distinct periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SineSweepsConfig {
    /// Sweep duration in minutes
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: f64,

    /// Time between samples in seconds
    #[serde(default = "default_sample_interval_seconds")]
    pub sample_interval_seconds: f64,

    /// Period at `t = 0` in minutes
    #[serde(default = "default_start_period_minutes")]
    pub start_period_minutes: f64,

    /// Period at the end of the sweep in minutes
    #[serde(default = "default_end_period_minutes")]
    pub end_period_minutes: f64,

    /// Linear or exponential sweep
    #[serde(default)]
    pub sweep_type: SweepKind,
}

fn default_duration_minutes() -> f64 {
    60.0
}

fn default_sample_interval_seconds() -> f64 {
    1.0
}

fn default_start_period_minutes() -> f64 {
    1.0
}

fn default_end_period_minutes() -> f64 {
    10.0
}

impl Default for SineSweepsConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            sample_interval_seconds: default_sample_interval_seconds(),
            start_period_minutes: default_start_period_minutes(),
            end_period_minutes: default_end_period_minutes(),
            sweep_type: SweepKind::Linear,
        }
    }
}

impl SineSweepsConfig {
    /// Override fields with command line values when they are provided
    pub fn apply_args(
        &mut self,
        duration_minutes: Option<f64>,
        sample_interval_seconds: Option<f64>,
        start_period_minutes: Option<f64>,
        end_period_minutes: Option<f64>,
        sweep_type: Option<SweepKind>,
    ) {
        if let Some(duration) = duration_minutes {
            debug!("Overriding sweep duration from command line: {}", duration);
            self.duration_minutes = duration;
        }
        if let Some(interval) = sample_interval_seconds {
            debug!("Overriding sweep sample interval from command line: {}", interval);
            self.sample_interval_seconds = interval;
        }
        if let Some(period) = start_period_minutes {
            debug!("Overriding sweep start period from command line: {}", period);
            self.start_period_minutes = period;
        }
        if let Some(period) = end_period_minutes {
            debug!("Overriding sweep end period from command line: {}", period);
            self.end_period_minutes = period;
        }
        if let Some(kind) = sweep_type {
            debug!("Overriding sweep type from command line: {}", kind);
            self.sweep_type = kind;
        }
    }
}
