// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Spectral analysis module
//!
//! This module turns a sampled real sequence into its single-sided
//! amplitude and phase spectrum.

mod fft;

pub use fft::{compute_spectrum, DftAnalyzer, SpectralAnalyzer, SpectralPeak, Spectrum};

/// Create a new spectral analyzer that reuses FFT plans between calls
pub fn create_spectral_analyzer() -> Box<dyn SpectralAnalyzer> {
    Box::new(DftAnalyzer::new())
}
