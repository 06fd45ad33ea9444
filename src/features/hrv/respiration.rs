//! Respiration rate from respiratory sinus arrhythmia
//!
//! Breathing modulates the heart rate, so the dominant peak of the HF band
//! sits at the breathing frequency.

use super::welch::WelchResult;
use crate::error::AnalysisError;

/// Respiration rate in breaths per minute
///
/// Frequency of the largest HF bin times 60; the first bin wins on ties.
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if the HF band contains no bins
pub fn respiration_rate(welch: &WelchResult) -> Result<f64, AnalysisError> {
    let hf = welch.hf_band();
    if hf.is_empty() {
        return Err(AnalysisError::ProcessingError(
            "No frequencies in the HF band".to_string(),
        ));
    }

    let mut peak_freq = hf.frequencies[0];
    let mut max_power = f64::NEG_INFINITY;
    for (&f, &p) in hf.frequencies.iter().zip(hf.psd.iter()) {
        if p > max_power {
            max_power = p;
            peak_freq = f;
        }
    }

    log::debug!(
        "HF peak at {:.4} Hz (power={:.4})",
        peak_freq,
        max_power
    );

    Ok(peak_freq * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_frequency_to_bpm() {
        let result = WelchResult::new(
            vec![0.1, 0.2, 0.25, 0.3, 0.5],
            vec![9.0, 1.0, 4.0, 2.0, 8.0],
        );
        // LF and out-of-band bins are ignored
        assert!((respiration_rate(&result).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_peak_wins_ties() {
        let result = WelchResult::new(vec![0.2, 0.3], vec![5.0, 5.0]);
        assert!((respiration_rate(&result).unwrap() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_hf_band() {
        let result = WelchResult::new(vec![0.05, 0.1], vec![1.0, 1.0]);
        assert!(respiration_rate(&result).is_err());
    }
}
