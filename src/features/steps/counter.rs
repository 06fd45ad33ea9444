//! Frequency-domain step counter
//!
//! Slides a window over the gyroscope signal. For each window the most active
//! axis is transformed with an FFT; if the gait band (bins 2..7) dominates the
//! lowest bins, the gait frequency is located between bins with a polynomial
//! fit and converted into a step count for the hop duration.
//!
//! # Algorithm
//!
//! For each window start `i` (hop `ts * fs`) with `i + N < len`:
//! 1. `S = 2 * |FFT(axis)|` on the most sensitive axis
//! 2. `w0 = mean(S[0..2])`, `wc = mean(S[2..7])`
//! 3. Fit a quartic through `(1..=5, S[2..7])` and maximise on `[1, 5]`
//! 4. If `wc > w0` and `wc > min_gait_magnitude`: `steps += ts * res * (peak + 1)`
//!
//! # Example
//!
//! ```no_run
//! use wc_dsp::features::steps::counter::count_steps;
//! use wc_dsp::config::StepConfig;
//! use wc_dsp::io::sensor::read_sensor_csv;
//!
//! let samples = read_sensor_csv("data/gyro.csv")?;
//! let result = count_steps(&samples, &StepConfig::default())?;
//! println!("{:.1} steps", result.total_steps);
//! # Ok::<(), wc_dsp::AnalysisError>(())
//! ```

use super::axis::most_sensitive_axis;
use super::polynomial::{golden_section_max, polyfit, polyval};
use super::spectrum::magnitude_spectrum;
use crate::analysis::result::{StepCountResult, StepWindow};
use crate::config::StepConfig;
use crate::error::AnalysisError;
use crate::io::sensor::SensorSample;

/// Bins averaged for the baseline (`S[0..2]`)
const BASELINE_BINS: std::ops::Range<usize> = 0..2;

/// Bins forming the gait band (`S[2..7]`)
const GAIT_BINS: std::ops::Range<usize> = 2..7;

/// Degree of the polynomial fitted through the gait band
const GAIT_FIT_DEGREE: usize = 4;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Count steps in a gyroscope recording
///
/// # Arguments
///
/// * `samples` - Gyroscope samples in time order
/// * `config` - Window and threshold parameters
///
/// # Returns
///
/// `StepCountResult` with the total and a per-window breakdown. A recording
/// not longer than one window yields zero steps.
///
/// # Errors
///
/// Returns `AnalysisError` if the window is smaller than the gait band, the
/// sampling frequency is not positive or the hop is zero.
pub fn count_steps(
    samples: &[SensorSample],
    config: &StepConfig,
) -> Result<StepCountResult, AnalysisError> {
    let window_size = config.window_size;
    if window_size < GAIT_BINS.end {
        return Err(AnalysisError::InvalidInput(format!(
            "Window size must be at least {}, got {}",
            GAIT_BINS.end, window_size
        )));
    }
    if config.sampling_frequency <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Sampling frequency must be > 0, got {}",
            config.sampling_frequency
        )));
    }
    let hop = config.hop_size();
    if hop == 0 {
        return Err(AnalysisError::InvalidInput(
            "Window duration yields a zero-sample hop".to_string(),
        ));
    }

    let resolution = config.resolution();
    let gait_x: Vec<f64> = (1..=GAIT_BINS.len()).map(|v| v as f64).collect();

    log::debug!(
        "Counting steps in {} samples: window={}, hop={}, resolution={:.4} Hz",
        samples.len(),
        window_size,
        hop,
        resolution
    );

    let mut result = StepCountResult::default();
    let mut start = 0;
    while start + window_size < samples.len() {
        let window = &samples[start..start + window_size];
        let axis = most_sensitive_axis(window);
        let magnitudes = magnitude_spectrum(&axis.extract(window));

        let w0 = mean(&magnitudes[BASELINE_BINS]);
        let wc = mean(&magnitudes[GAIT_BINS]);

        let coefficients = polyfit(&gait_x, &magnitudes[GAIT_BINS], GAIT_FIT_DEGREE)?;
        let peak_position = golden_section_max(
            |x| polyval(&coefficients, x),
            1.0,
            GAIT_BINS.len() as f64,
            config.search_tolerance,
        );

        let mut steps = 0.0;
        if wc > w0 && wc > config.min_gait_magnitude {
            let gait_frequency = resolution * (peak_position + 1.0);
            steps = config.window_duration * gait_frequency;

            let previous = result.total_steps;
            result.total_steps += steps;
            log::info!(
                "Increase step count from {:.3} to {:.3} by {:.3} (window at {}, axis {:?})",
                previous,
                result.total_steps,
                steps,
                start,
                axis
            );
        }

        result.windows.push(StepWindow {
            start_index: start,
            axis,
            w0,
            wc,
            peak_position,
            steps,
        });

        start += hop;
    }

    log::info!(
        "{:.2} steps were made ({} of {} windows walking)",
        result.total_steps,
        result.windows.iter().filter(|w| w.is_walking()).count(),
        result.windows.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::steps::axis::Axis;
    use std::f64::consts::PI;

    fn gyro(n: usize, fs: f64, gait_hz: f64, amplitude: f64) -> Vec<SensorSample> {
        (0..n)
            .map(|i| {
                let t = i as f64 / fs;
                SensorSample {
                    time: t,
                    wx: 0.1 * (2.0 * PI * 7.0 * t).sin(),
                    wy: 0.2,
                    wz: amplitude * (2.0 * PI * gait_hz * t).sin(),
                }
            })
            .collect()
    }

    #[test]
    fn test_walking_signal() {
        let config = StepConfig::default();
        let samples = gyro(6000, 100.0, 0.9, 100.0);
        let result = count_steps(&samples, &config).unwrap();

        // Window starts 0, 125, ..., 5375
        assert_eq!(result.windows.len(), 44);
        assert!(result.windows.iter().all(|w| w.axis == Axis::Z));
        assert!(result.windows.iter().all(|w| w.is_walking()));

        for window in &result.windows {
            let gait_frequency = config.resolution() * (window.peak_position + 1.0);
            assert!(
                (0.7..1.1).contains(&gait_frequency),
                "gait frequency {:.3} Hz",
                gait_frequency
            );
        }

        let per_window = config.window_duration * 0.9;
        let expected = per_window * 44.0;
        assert!(
            (result.total_steps - expected).abs() / expected < 0.2,
            "total {:.2}, expected about {:.2}",
            result.total_steps,
            expected
        );
    }

    #[test]
    fn test_resting_signal_counts_nothing() {
        let samples = gyro(3000, 100.0, 0.9, 0.0);
        let result = count_steps(&samples, &StepConfig::default()).unwrap();
        assert!(!result.windows.is_empty());
        assert_eq!(result.total_steps, 0.0);
        assert!(result.windows.iter().all(|w| !w.is_walking()));
    }

    #[test]
    fn test_signal_not_longer_than_window() {
        let samples = gyro(512, 100.0, 0.9, 100.0);
        let result = count_steps(&samples, &StepConfig::default()).unwrap();
        assert!(result.windows.is_empty());
        assert_eq!(result.total_steps, 0.0);
    }

    #[test]
    fn test_invalid_config() {
        let samples = gyro(1000, 100.0, 0.9, 100.0);
        let config = StepConfig {
            window_size: 6,
            ..StepConfig::default()
        };
        assert!(count_steps(&samples, &config).is_err());

        let config = StepConfig {
            window_duration: 0.0,
            ..StepConfig::default()
        };
        assert!(count_steps(&samples, &config).is_err());
    }
}
