// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Uniform time grids

use crate::error::{Result, SignalError};

/// Relative tolerance under which `duration / step` counts as a whole number
const STEP_RATIO_TOLERANCE: f64 = 1e-9;

/// Number of whole steps needed to reach `duration`, rounding up.
fn steps_to_reach(duration: f64, step: f64) -> Result<usize> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SignalError::invalid(format!(
            "time step must be finite and positive, got {}",
            step
        )));
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(SignalError::invalid(format!(
            "duration must be finite and non-negative, got {}",
            duration
        )));
    }

    let ratio = duration / step;
    let nearest = ratio.round();
    let steps = if (ratio - nearest).abs() <= STEP_RATIO_TOLERANCE * ratio.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    // usize::MAX as f64 rounds up to 2^64, so anything below it converts exactly
    if steps >= usize::MAX as f64 {
        return Err(SignalError::invalid(format!(
            "{} steps of {} do not fit in a time grid",
            ratio, step
        )));
    }
    Ok(steps as usize)
}

/// Allocate and fill `count` grid points, failing instead of aborting when
/// the grid cannot be allocated.
fn build_grid(count: usize, step: f64) -> Result<Vec<f64>> {
    let mut grid = Vec::new();
    grid.try_reserve_exact(count).map_err(|_| {
        SignalError::invalid(format!("cannot allocate a time grid of {} samples", count))
    })?;
    grid.extend((0..count).map(|i| i as f64 * step));
    Ok(grid)
}

/// Number of samples in [`inclusive_time_grid`] for the same arguments
pub fn inclusive_sample_count(duration: f64, step: f64) -> Result<usize> {
    steps_to_reach(duration, step)?
        .checked_add(1)
        .ok_or_else(|| SignalError::invalid("time grid sample count overflows"))
}

/// Number of samples in [`half_open_time_grid`] for the same arguments
pub fn half_open_sample_count(duration: f64, step: f64) -> Result<usize> {
    steps_to_reach(duration, step)
}

/// Time grid `0, Δt, 2Δt, …` that includes `duration`.
///
/// The last sample is `duration` itself when it lies on the grid, otherwise
/// the first grid point past it, so the grid holds `⌈T/Δt⌉ + 1` samples.
///
/// ```
/// use stacked_sines::synthesis::inclusive_time_grid;
///
/// let t = inclusive_time_grid(60.0, 1.0 / 60.0).unwrap();
/// assert_eq!(t.len(), 3601);
/// assert!((t[3600] - 60.0).abs() < 1e-9);
/// ```
pub fn inclusive_time_grid(duration: f64, step: f64) -> Result<Vec<f64>> {
    let count = inclusive_sample_count(duration, step)?;
    build_grid(count, step)
}

/// Half-open time grid covering `0 <= t < duration` with `⌈T/Δt⌉` samples.
pub fn half_open_time_grid(duration: f64, step: f64) -> Result<Vec<f64>> {
    let count = half_open_sample_count(duration, step)?;
    build_grid(count, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_grid_counts() {
        assert_eq!(inclusive_time_grid(60.0, 1.0 / 60.0).unwrap().len(), 3601);
        assert_eq!(inclusive_time_grid(10.0, 1.0).unwrap().len(), 11);
        assert_eq!(inclusive_time_grid(0.0, 1.0).unwrap(), vec![0.0]);

        // 10.5 is not on the grid, so the grid runs to 11
        let t = inclusive_time_grid(10.5, 1.0).unwrap();
        assert_eq!(t.len(), 12);
        assert_eq!(*t.last().unwrap(), 11.0);
    }

    #[test]
    fn test_half_open_grid_counts() {
        assert_eq!(half_open_time_grid(10.0, 1.0).unwrap().len(), 10);
        assert_eq!(half_open_time_grid(10.5, 1.0).unwrap().len(), 11);
        assert!(half_open_time_grid(0.0, 1.0).unwrap().is_empty());

        // 90 days of hourly samples
        let t = half_open_time_grid(90.0 * 2.0, 1.0 / 24.0).unwrap();
        assert_eq!(t.len(), 4320);
    }

    #[test]
    fn test_grid_is_evenly_spaced() {
        let step = 0.25;
        let t = inclusive_time_grid(3.0, step).unwrap();
        for (i, &v) in t.iter().enumerate() {
            assert_eq!(v, i as f64 * step);
        }
    }

    #[test]
    fn test_counts_match_grids() {
        for (duration, step) in [(60.0, 1.0 / 60.0), (7.3, 0.1), (0.0, 2.0), (1.0, 3.0)] {
            assert_eq!(
                inclusive_sample_count(duration, step).unwrap(),
                inclusive_time_grid(duration, step).unwrap().len()
            );
            assert_eq!(
                half_open_sample_count(duration, step).unwrap(),
                half_open_time_grid(duration, step).unwrap().len()
            );
        }
    }

    #[test]
    fn test_huge_ratios_are_rejected() {
        for result in [
            inclusive_sample_count(1e300, 1.0),
            half_open_sample_count(1e300, 1.0),
            inclusive_sample_count(1.0, f64::MIN_POSITIVE),
            inclusive_sample_count(2.0_f64.powi(64), 1.0),
        ] {
            assert!(
                matches!(result, Err(SignalError::InvalidArgument { .. })),
                "{:?}",
                result
            );
        }
        assert!(inclusive_time_grid(1e300, 1.0).is_err());
        assert!(half_open_time_grid(1e300, 1.0).is_err());

        // Fits in a usize but not in memory
        assert!(half_open_time_grid(1e19, 1.0).is_err());
    }

    #[test]
    fn test_rejects_bad_steps() {
        assert!(inclusive_time_grid(1.0, 0.0).is_err());
        assert!(inclusive_time_grid(1.0, -0.5).is_err());
        assert!(inclusive_time_grid(1.0, f64::NAN).is_err());
        assert!(half_open_time_grid(-1.0, 0.5).is_err());
        assert!(half_open_time_grid(f64::INFINITY, 0.5).is_err());
    }
}
