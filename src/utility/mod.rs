// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Utility module for noise sources shared by the synthesizers

pub mod noise_generator;

// Re-exports for use in other modules
pub use noise_generator::{colored_noise, NoiseGenerator};
