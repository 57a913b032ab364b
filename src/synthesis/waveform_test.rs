// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stacked-sines project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use super::*;
use crate::error::SignalError;
use crate::spectral::compute_spectrum;
use crate::utility::NoiseGenerator;
use std::f64::consts::PI;

#[cfg(test)]
mod tests {
    use super::*;

    /// Times where the signal changes sign, linearly interpolated
    fn zero_crossings(times: &[f64], signal: &[f64]) -> Vec<f64> {
        let mut crossings = Vec::new();
        for i in 1..signal.len() {
            let (a, b) = (signal[i - 1], signal[i]);
            if a == 0.0 {
                crossings.push(times[i - 1]);
            } else if a * b < 0.0 {
                let fraction = a / (a - b);
                crossings.push(times[i - 1] + fraction * (times[i] - times[i - 1]));
            }
        }
        crossings
    }

    /// Local frequency from the spacing of two neighbouring crossings
    fn frequency_from(crossings: &[f64]) -> f64 {
        1.0 / (2.0 * (crossings[1] - crossings[0]))
    }

    fn assert_sweep_end_points(kind: SweepKind) {
        let duration = 6000.0;
        let sweep = SweepSpec::new(1.0, 10.0, kind, duration).unwrap();
        let times = inclusive_time_grid(duration, 1.0 / 60.0).unwrap();
        let signal = sweep.synthesize(&times).unwrap();
        let crossings = zero_crossings(&times, &signal);
        assert!(crossings.len() > 4);

        let start = frequency_from(&crossings[..2]);
        assert!(
            (start - 1.0).abs() < 0.05,
            "{} sweep starts at {} cycles per minute",
            kind,
            start
        );

        let end = frequency_from(&crossings[crossings.len() - 2..]);
        assert!(
            (end - 0.1).abs() < 0.005,
            "{} sweep ends at {} cycles per minute",
            kind,
            end
        );
    }

    #[test]
    fn test_tone_sum_adds_unit_sines() {
        let times = inclusive_time_grid(2.0, 0.01).unwrap();
        let tones = [Tone::new(1.0), Tone::from_period(0.5)];
        let signal = tone_sum(&tones, &times);
        for (&t, &x) in times.iter().zip(&signal) {
            let expected = (2.0 * PI * t).sin() + (4.0 * PI * t).sin();
            assert!((x - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tone_amplitude_scales_output() {
        let tone = Tone::new(0.25).with_amplitude(3.0);
        assert!((tone.sample(1.0) - 3.0).abs() < 1e-12);
        assert!(tone_sum(&[], &[0.0, 1.0]).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_on_bin_tone_round_trip() {
        // 128 samples at 128 per unit time: bins are 1 cycle apart
        let times = inclusive_time_grid(127.0 / 128.0, 1.0 / 128.0).unwrap();
        assert_eq!(times.len(), 128);
        let signal = tone_sum(&[Tone::new(10.0)], &times);
        let spectrum = compute_spectrum(&signal, 128.0).unwrap();

        assert!((spectrum.amplitudes[10] - 1.0).abs() < 1e-6);
        for (i, &a) in spectrum.amplitudes.iter().enumerate() {
            if i != 10 {
                assert!(a < 1e-6);
            }
        }
    }

    #[test]
    fn test_three_tone_scenario_spectrum() {
        let step = 1.0 / 60.0;
        let times = inclusive_time_grid(60.0, step).unwrap();
        assert_eq!(times.len(), 3601);

        let tones: Vec<Tone> = [1.0, 5.0, 10.0].iter().map(|&p| Tone::from_period(p)).collect();
        let signal = tone_sum(&tones, &times);
        let spectrum = compute_spectrum(&signal, 1.0 / step).unwrap();
        assert_eq!(spectrum.len(), 1800);

        for period in [1.0, 5.0, 10.0] {
            let bin = spectrum.nearest_bin(1.0 / period).unwrap();
            assert!(
                (spectrum.amplitudes[bin] - 1.0).abs() < 0.02,
                "amplitude {} at period {}",
                spectrum.amplitudes[bin],
                period
            );
        }
    }

    #[test]
    fn test_linear_sweep_end_frequencies() {
        assert_sweep_end_points(SweepKind::Linear);
    }

    #[test]
    fn test_exponential_sweep_end_frequencies() {
        assert_sweep_end_points(SweepKind::Exponential);
    }

    #[test]
    fn test_sweep_frequency_law() {
        let linear = SweepSpec::new(1.0, 10.0, SweepKind::Linear, 60.0).unwrap();
        assert!((linear.frequency_at(0.0) - 1.0).abs() < 1e-12);
        assert!((linear.frequency_at(30.0) - 0.55).abs() < 1e-12);
        assert!((linear.frequency_at(60.0) - 0.1).abs() < 1e-12);

        let exponential = SweepSpec::new(1.0, 10.0, SweepKind::Exponential, 60.0).unwrap();
        assert!((exponential.frequency_at(30.0) - 0.1f64.sqrt()).abs() < 1e-12);
        assert!((exponential.frequency_at(60.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_linear_chirp_matches_phase_law() {
        let times = [0.0, 0.5, 1.0, 2.0];
        let (w1, w2, duration) = (2.0, 6.0, 2.0);
        let signal = linear_chirp(&times, w1, w2, duration).unwrap();
        for (&t, &x) in times.iter().zip(&signal) {
            let phase = w1 * t + t * t * (w2 - w1) / (2.0 * duration);
            assert!((x - phase.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_exponential_chirp_matches_phase_law() {
        let times = [0.0, 0.5, 1.0, 2.0];
        let (w1, w2, duration) = (2.0, 6.0, 2.0);
        let signal = exponential_chirp(&times, w1, w2, duration).unwrap();
        let log_ratio = (w2 / w1).ln();
        for (&t, &x) in times.iter().zip(&signal) {
            let phase = w1 * duration / log_ratio * (t / duration * log_ratio).exp();
            assert!((x - phase.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_exponential_chirp_rejects_degenerate_ratios() {
        let times = [0.0, 1.0];
        for (w1, w2) in [(1.0, 1.0), (1.0, -1.0), (0.0, 1.0), (1.0, 0.0), (-2.0, 3.0)] {
            assert!(
                matches!(
                    exponential_chirp(&times, w1, w2, 10.0),
                    Err(SignalError::InvalidArgument { .. })
                ),
                "accepted w1={} w2={}",
                w1,
                w2
            );
        }
        assert!(exponential_chirp(&times, 1.0, 2.0, 0.0).is_err());
        assert!(linear_chirp(&times, 1.0, 2.0, -1.0).is_err());
    }

    #[test]
    fn test_sweep_spec_validation() {
        assert!(SweepSpec::new(5.0, 5.0, SweepKind::Exponential, 60.0).is_err());
        assert!(SweepSpec::new(5.0, 5.0, SweepKind::Linear, 60.0).is_ok());
        assert!(SweepSpec::new(0.0, 5.0, SweepKind::Linear, 60.0).is_err());
        assert!(SweepSpec::new(1.0, 5.0, SweepKind::Linear, 0.0).is_err());
    }

    #[test]
    fn test_add_noise_scales_and_checks_length() {
        let signal = [1.0, 2.0, 3.0];
        let noise = [0.5, -0.5, 1.0];
        assert_eq!(add_noise(&signal, &noise, 2.0).unwrap(), vec![2.0, 1.0, 5.0]);
        assert_eq!(add_noise(&signal, &noise, 0.0).unwrap(), signal.to_vec());
        assert!(add_noise(&signal, &noise[..2], 1.0).is_err());
    }

    #[test]
    fn test_noisy_tone_sum_is_seed_reproducible() {
        let times = half_open_time_grid(10.0, 0.01).unwrap();
        let tones = [Tone::new(1.0)];
        let a = noisy_tone_sum(&tones, &times, 1.0, 0.5, &mut NoiseGenerator::new(8)).unwrap();
        let b = noisy_tone_sum(&tones, &times, 1.0, 0.5, &mut NoiseGenerator::new(8)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), times.len());

        let clean = noisy_tone_sum(&tones, &times, 1.0, 0.0, &mut NoiseGenerator::new(8)).unwrap();
        assert_eq!(clean, tone_sum(&tones, &times));
    }
}
