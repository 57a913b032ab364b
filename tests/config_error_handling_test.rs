// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use stacked_sines::config::Config;
use std::fs;
use std::path::Path;
use std::sync::Once;
use tempfile::tempdir;

static INIT: Once = Once::new();

// Setup logger for tests
fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

/// Write `contents`, load it and check that loading fails and leaves a
/// valid sample file behind
fn assert_rejected_with_sample(contents: &str) -> Result<String> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents)?;

    let result = Config::from_file(&config_path);
    let err = match result {
        Ok(config) => panic!("Config loading should have failed, got {:?}", config),
        Err(err) => err.to_string(),
    };

    let sample_path = config_path.with_extension("sample.yaml");
    assert!(
        Path::new(&sample_path).exists(),
        "Sample config file was not created"
    );
    let sample_config = Config::from_file(&sample_path)?;
    assert_eq!(sample_config, Config::default());

    Ok(err)
}

#[test]
fn test_config_type_error_creates_sample_file() -> Result<()> {
    setup();
    let err = assert_rejected_with_sample(
        r#"
sine_stacks:
  duration_minutes: "an hour"  # String where a number is expected
  periods_minutes: 5           # Number where an array is expected
"#,
    )?;
    assert!(err.contains("validation failed"), "{}", err);
    Ok(())
}

#[test]
fn test_config_range_error_creates_sample_file() -> Result<()> {
    setup();
    let err = assert_rejected_with_sample(
        r#"
noisy_stacks:
  stacks: 20  # Valid range is 1-10
"#,
    )?;
    assert!(err.contains("validation failed"), "{}", err);

    assert_rejected_with_sample(
        r#"
sine_stacks:
  periods_minutes: [1.0, 90.0]  # Periods are limited to 60 minutes
"#,
    )?;
    Ok(())
}

#[test]
fn test_config_unknown_field_is_rejected() -> Result<()> {
    setup();
    assert_rejected_with_sample(
        r#"
sine_sweeps:
  sweep_type: logarithmic
"#,
    )?;
    assert_rejected_with_sample(
        r#"
noisy_stacks:
  window: hann
"#,
    )?;
    Ok(())
}

#[test]
fn test_config_rule_error_creates_sample_file() -> Result<()> {
    setup();
    let err = assert_rejected_with_sample(
        r#"
sine_sweeps:
  start_period_minutes: 5
  end_period_minutes: 5
  sweep_type: exponential
"#,
    )?;
    assert!(err.contains("two different periods"), "{}", err);

    let err = assert_rejected_with_sample(
        r#"
noisy_stacks:
  duration_days: 1.5
  sample_interval_minutes: 7
  stacks: 3
"#,
    )?;
    assert!(err.contains("equal stacks"), "{}", err);
    Ok(())
}

#[test]
fn test_malformed_yaml_is_an_error() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "sine_stacks: [unterminated\n")?;

    assert!(Config::from_file(&config_path).is_err());
    Ok(())
}
