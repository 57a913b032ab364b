// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the stacked sines demonstrations

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use stacked_sines::config::{output_config_schema, Config};
use stacked_sines::synthesis::SweepKind;
use stacked_sines::{NoiseGenerator, PlotType, Scenario, ScenarioOutput};

/// Stacked sine waves, coloured noise and swept sines with their spectra
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML), created with defaults when missing
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Write the scenario output as JSON instead of printing a summary
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of spectral peaks listed in the summary
    #[arg(long, default_value_t = 5)]
    peaks: usize,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    show_config_schema: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sum of unit sines given by their periods in minutes
    Stacks {
        /// Test duration in minutes
        #[arg(long)]
        duration: Option<f64>,

        /// Time between samples in seconds
        #[arg(long)]
        interval: Option<f64>,

        /// Tone periods in minutes, comma separated
        #[arg(long, value_delimiter = ',')]
        periods: Option<Vec<f64>>,
    },
    /// Tones in cycles per day buried in 1/f^β noise, before and after stacking
    Noisy {
        /// Length of one stack in days
        #[arg(long)]
        duration: Option<f64>,

        /// Time between samples in minutes
        #[arg(long)]
        interval: Option<f64>,

        /// Noise spectral exponent β
        #[arg(long, allow_hyphen_values = true)]
        exponent: Option<f64>,

        /// Noise level
        #[arg(long)]
        level: Option<f64>,

        /// Number of stacks to average
        #[arg(long)]
        stacks: Option<usize>,

        /// Amplitude plot scale
        #[arg(long, value_enum)]
        plot: Option<PlotArg>,

        /// Seed for a reproducible noise draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Linear or exponential sweep between two periods
    Sweeps {
        /// Sweep duration in minutes
        #[arg(long)]
        duration: Option<f64>,

        /// Time between samples in seconds
        #[arg(long)]
        interval: Option<f64>,

        /// Period at the start of the sweep in minutes
        #[arg(long)]
        start_period: Option<f64>,

        /// Period at the end of the sweep in minutes
        #[arg(long)]
        end_period: Option<f64>,

        /// Sweep law
        #[arg(long, value_enum)]
        sweep: Option<SweepArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlotArg {
    Linear,
    LogLog,
}

impl From<PlotArg> for PlotType {
    fn from(arg: PlotArg) -> Self {
        match arg {
            PlotArg::Linear => PlotType::Linear,
            PlotArg::LogLog => PlotType::LogLog,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SweepArg {
    Linear,
    Exponential,
}

impl From<SweepArg> for SweepKind {
    fn from(arg: SweepArg) -> Self {
        match arg {
            SweepArg::Linear => SweepKind::Linear,
            SweepArg::Exponential => SweepKind::Exponential,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.show_config_schema {
        return output_config_schema();
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;
    debug!("Loaded configuration: {:?}", config);

    let mut generator = NoiseGenerator::new_from_entropy();
    let scenario: &dyn Scenario = match command {
        Command::Stacks {
            duration,
            interval,
            periods,
        } => {
            config.sine_stacks.apply_args(duration, interval, periods);
            &config.sine_stacks
        }
        Command::Noisy {
            duration,
            interval,
            exponent,
            level,
            stacks,
            plot,
            seed,
        } => {
            config.noisy_stacks.apply_args(
                duration,
                interval,
                exponent,
                level,
                stacks,
                plot.map(PlotType::from),
            );
            if let Some(seed) = seed {
                debug!("Using noise seed {}", seed);
                generator = NoiseGenerator::new(seed);
            }
            &config.noisy_stacks
        }
        Command::Sweeps {
            duration,
            interval,
            start_period,
            end_period,
            sweep,
        } => {
            config.sine_sweeps.apply_args(
                duration,
                interval,
                start_period,
                end_period,
                sweep.map(SweepKind::from),
            );
            &config.sine_sweeps
        }
    };
    config.validate().context("Invalid command line overrides")?;

    info!("Running scenario {}", scenario.name());
    let output = scenario.run(&mut generator)?;

    if let Some(output_path) = args.output {
        println!("Saving results to: {}", output_path.display());
        std::fs::write(&output_path, serde_json::to_string_pretty(&output)?)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
    } else {
        print_summary(&output, args.peaks);
    }

    Ok(())
}

/// Print the strongest peaks of every spectrum in the output
fn print_summary(output: &ScenarioOutput, count: usize) {
    println!("Scenario: {}", output.scenario);
    println!("Samples: {}", output.signal.len());
    for labeled in &output.spectra {
        let spectrum = &labeled.spectrum;
        println!(
            "{} spectrum: {} bins, resolution {:.6} {}",
            labeled.label,
            spectrum.len(),
            spectrum.resolution(),
            output.frequency_unit
        );
        for peak in spectrum.peaks(count) {
            println!(
                "- {:.6} {} (period {:.4} {}): amplitude {:.4}",
                peak.frequency,
                output.frequency_unit,
                1.0 / peak.frequency,
                output.time_unit,
                peak.amplitude
            );
        }
    }
}
