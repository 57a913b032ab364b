// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Stacked sines library
//!
//! Synthesizes test signals (tone sums, sweeps and coloured noise), reduces
//! noise by stack averaging and inspects the result with a normalised
//! single-sided DFT.

pub mod config;
pub mod error;
pub mod scenario;
pub mod signal;
pub mod spectral;
pub mod stacking;
pub mod synthesis;
pub mod utility;

pub use error::{Result, SignalError};
pub use scenario::{LabeledSpectrum, PlotType, Scenario, ScenarioOutput};
pub use signal::SampledSignal;
pub use spectral::{compute_spectrum, Spectrum};
pub use stacking::stack_and_average;
pub use utility::{colored_noise, NoiseGenerator};
