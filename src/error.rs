// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Errors raised by the numeric core

use thiserror::Error;

/// Errors raised by synthesis, stacking and spectral estimation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("FFT processing failed: {reason}")]
    Transform { reason: String },
}

impl SignalError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SignalError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl From<realfft::FftError> for SignalError {
    fn from(err: realfft::FftError) -> Self {
        SignalError::Transform {
            reason: format!("{:?}", err),
        }
    }
}

impl From<ndarray::ShapeError> for SignalError {
    fn from(err: ndarray::ShapeError) -> Self {
        SignalError::invalid(format!("array reshape failed: {}", err))
    }
}

/// Result type of the numeric core
pub type Result<T> = std::result::Result<T, SignalError>;
