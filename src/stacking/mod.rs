// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Stack averaging module
//!
//! A sequence of `N` samples is split into `K` interleaved epochs: epoch `j`
//! holds samples `j, j + K, j + 2K, …`. Averaging across the epochs gives a
//! sequence of `M = N / K` samples whose uncorrelated noise variance is
//! reduced by about `K`, at an effective sample rate of `Fs / K`.

use log::debug;
use ndarray::{ArrayView2, Axis};

use crate::error::{Result, SignalError};

/// Average `samples` across `stacks` interleaved epochs.
///
/// The samples are viewed row-major as an `[N / K, K]` array and averaged
/// along the second axis, so `output[i]` is the mean of
/// `samples[i * K .. (i + 1) * K]`.
///
/// # Errors
///
/// `InvalidArgument` when `stacks` is zero, exceeds the sample count, or
/// does not divide it exactly. No samples are ever dropped.
///
/// # Examples
///
/// ```
/// use stacked_sines::stacking::stack_and_average;
///
/// let stacked = stack_and_average(&[1.0, 3.0, 5.0, 7.0], 2).unwrap();
/// assert_eq!(stacked, vec![2.0, 6.0]);
/// assert!(stack_and_average(&[1.0, 2.0, 3.0], 2).is_err());
/// ```
pub fn stack_and_average(samples: &[f64], stacks: usize) -> Result<Vec<f64>> {
    let n = samples.len();
    if stacks == 0 {
        return Err(SignalError::invalid("number of stacks must be at least 1"));
    }
    if stacks > n {
        return Err(SignalError::invalid(format!(
            "cannot split {} samples into {} stacks",
            n, stacks
        )));
    }
    if n % stacks != 0 {
        return Err(SignalError::invalid(format!(
            "{} samples are not divisible into {} stacks ({} left over)",
            n,
            stacks,
            n % stacks
        )));
    }

    let epoch_len = n / stacks;
    debug!(
        "Stacking {} samples into {} epochs of {}",
        n, stacks, epoch_len
    );

    let view = ArrayView2::from_shape((epoch_len, stacks), samples)?;
    let mean = view
        .mean_axis(Axis(1))
        .ok_or_else(|| SignalError::invalid("cannot average an empty stack axis"))?;
    Ok(mean.to_vec())
}

/// Sample rate after stacking `stacks` epochs of a signal sampled at `sample_rate`
pub fn stacked_sample_rate(sample_rate: f64, stacks: usize) -> Result<f64> {
    if stacks == 0 {
        return Err(SignalError::invalid("number of stacks must be at least 1"));
    }
    Ok(sample_rate / stacks as f64)
}
