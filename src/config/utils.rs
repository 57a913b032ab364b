// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! Schema access and the validation rules that a JSON schema cannot express.

use anyhow::{Context, Result};
use log::debug;

use super::Config;
use crate::synthesis::{half_open_sample_count, inclusive_sample_count, SweepKind};

/// Largest time grid any scenario may allocate
pub const MAX_GRID_SAMPLES: usize = 2_000_000;

const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 60.0 * 24.0;

const SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Build a draft 2020-12 validator for the embedded configuration schema
pub(crate) fn schema_validator() -> Result<jsonschema::Validator> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA).context("Failed to parse JSON schema")?;
    let validator = jsonschema::draft202012::options()
        .should_validate_formats(true)
        .build(&schema)?;
    Ok(validator)
}

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./stacked_sines --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA).context("Failed to parse JSON schema")?;
    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;
    println!("{}", formatted_schema);
    Ok(())
}

fn check_grid_size(section: &str, samples: usize) -> Result<()> {
    if samples > MAX_GRID_SAMPLES {
        anyhow::bail!(
            "{}: {} samples exceed the limit of {}",
            section,
            samples,
            MAX_GRID_SAMPLES
        );
    }
    Ok(())
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Grid size**: no scenario may build a time grid of more than
///   [`MAX_GRID_SAMPLES`] samples
/// - **Exponential sweep**: start and end periods must differ
/// - **Stack divisibility**: the noisy stacks sample count must split evenly
///   into `stacks` epochs of at least two samples
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    let sines = &config.sine_stacks;
    let samples = inclusive_sample_count(
        sines.duration_minutes,
        sines.sample_interval_seconds / SECONDS_PER_MINUTE,
    )
    .context("sine_stacks: invalid time grid")?;
    check_grid_size("sine_stacks", samples)?;
    if sines.periods_minutes.iter().any(|p| !p.is_finite() || *p <= 0.0) {
        anyhow::bail!("sine_stacks: every period must be finite and positive");
    }

    let noisy = &config.noisy_stacks;
    if noisy.stacks == 0 {
        anyhow::bail!("noisy_stacks: number of stacks must be at least 1");
    }
    let samples = half_open_sample_count(
        noisy.duration_days * noisy.stacks as f64,
        noisy.sample_interval_minutes / MINUTES_PER_DAY,
    )
    .context("noisy_stacks: invalid time grid")?;
    check_grid_size("noisy_stacks", samples)?;
    if samples % noisy.stacks != 0 {
        anyhow::bail!(
            "noisy_stacks: {} samples cannot be split into {} equal stacks, adjust duration_days or sample_interval_minutes",
            samples,
            noisy.stacks
        );
    }
    if samples / noisy.stacks < 2 {
        anyhow::bail!(
            "noisy_stacks: each of the {} stacks must hold at least 2 samples",
            noisy.stacks
        );
    }
    debug!(
        "noisy_stacks: {} samples in {} stacks",
        samples, noisy.stacks
    );

    let sweeps = &config.sine_sweeps;
    let samples = inclusive_sample_count(
        sweeps.duration_minutes,
        sweeps.sample_interval_seconds / SECONDS_PER_MINUTE,
    )
    .context("sine_sweeps: invalid time grid")?;
    check_grid_size("sine_sweeps", samples)?;
    if sweeps.sweep_type == SweepKind::Exponential
        && sweeps.start_period_minutes == sweeps.end_period_minutes
    {
        anyhow::bail!("sine_sweeps: an exponential sweep needs two different periods");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate_specific_rules(&Config::default()).is_ok());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_exponential_sweep_needs_distinct_periods() {
        let mut config = Config::default();
        config.sine_sweeps.sweep_type = SweepKind::Exponential;
        config.sine_sweeps.start_period_minutes = 5.0;
        config.sine_sweeps.end_period_minutes = 5.0;
        assert!(validate_specific_rules(&config).is_err());

        // A linear sweep at a constant period is just a tone
        config.sine_sweeps.sweep_type = SweepKind::Linear;
        assert!(validate_specific_rules(&config).is_ok());
    }

    #[test]
    fn test_stack_divisibility() {
        let mut config = Config::default();
        // 1.5 days of 7 minute samples times 3 stacks: 926 samples
        config.noisy_stacks.duration_days = 1.5;
        config.noisy_stacks.sample_interval_minutes = 7.0;
        config.noisy_stacks.stacks = 3;
        let err = validate_specific_rules(&config).unwrap_err();
        assert!(err.to_string().contains("equal stacks"), "{}", err);

        config.noisy_stacks.sample_interval_minutes = 6.0;
        assert!(validate_specific_rules(&config).is_ok());
    }

    #[test]
    fn test_grid_size_limit() {
        let mut config = Config::default();
        config.noisy_stacks.duration_days = 2880.0;
        config.noisy_stacks.sample_interval_minutes = 1.0;
        config.noisy_stacks.stacks = 10;
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_overrides_are_range_checked() {
        let mut config = Config::default();
        config.noisy_stacks.apply_args(None, None, None, None, Some(11), None);
        assert!(validate_specific_rules(&config).is_ok());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sine_stacks.apply_args(None, Some(0.5), None);
        assert!(config.validate().is_err());
    }
}
