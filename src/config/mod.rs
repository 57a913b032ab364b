// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the stacked sines demonstrations
//!
//! The parameters of every scenario live in a YAML file that is validated
//! against an embedded JSON schema before being deserialized.
//!
//! ## Configuration Structure
//!
//! - `sine_stacks`: a sum of unit tones given by their periods in minutes
//! - `noisy_stacks`: tones in cycles per day, coloured noise and stacking
//! - `sine_sweeps`: a linear or exponential sweep between two periods
//!
//! Every section and every field is optional and falls back to its default.
//!
//! ## Usage
//!
//! ```no_run
//! use stacked_sines::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Override the number of stacks from the command line
//! config.noisy_stacks.apply_args(None, None, None, None, Some(4), None);
//! config.validate().unwrap();
//!
//! println!("Stacks: {}", config.noisy_stacks.stacks);
//! ```

pub mod noisy_stacks;
pub mod sine_stacks;
pub mod sine_sweeps;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use noisy_stacks::NoisyStacksConfig;
pub use sine_stacks::SineStacksConfig;
pub use sine_sweeps::SineSweepsConfig;
pub use utils::{output_config_schema, MAX_GRID_SAMPLES};

/// Root configuration holding one section per scenario.
///
/// Deserialized from and serialized to YAML with serde. Missing sections
/// take their default values, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Stacked sines scenario settings
    #[serde(default)]
    pub sine_stacks: SineStacksConfig,

    /// Noisy stacks scenario settings.
    ///
    /// The total signal length is `duration_days * stacks` and must split
    /// evenly into `stacks` epochs.
    #[serde(default)]
    pub noisy_stacks: NoisyStacksConfig,

    /// Swept sines scenario settings
    #[serde(default)]
    pub sine_sweeps: SineSweepsConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file.
    ///
    /// A missing file is created with the default configuration. When the
    /// file fails schema validation, deserialization or the rule checks of
    /// `validate_specific_rules`, a `<name>.sample.yaml` holding the defaults is
    /// written next to it and the error is returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let yaml_value: serde_yml::Value = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?;

        // An empty document parses as null and means "all defaults"
        let json_value = match serde_json::to_value(&yaml_value).with_context(|| {
            format!("Failed to convert YAML to JSON for validation: {:?}", path)
        })? {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let validator = utils::schema_validator()?;

        debug!("Validating {} configuration against schema", path.display());
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            Self::create_sample_config(path)?;
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = match serde_json::from_value(json_value) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                if let Err(e) = Self::create_sample_config(path) {
                    error!("Failed to create sample config: {}", e);
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        if let Err(err) = utils::validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration as it stands in memory.
    ///
    /// Checks the schema ranges and the rules the schema cannot express.
    /// Command line overrides bypass [`Config::from_file`], so run this
    /// after applying them.
    pub fn validate(&self) -> Result<()> {
        let json_value =
            serde_json::to_value(self).context("Failed to convert configuration to JSON")?;
        if let Err(error) = utils::schema_validator()?.validate(&json_value) {
            anyhow::bail!("Configuration validation failed: {}", error);
        }
        utils::validate_specific_rules(self)
    }
}
