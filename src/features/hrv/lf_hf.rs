//! Sympathovagal balance: ratio of LF to HF spectral power

use super::welch::WelchResult;
use crate::error::AnalysisError;

/// Trapezoidal integration of `y` over `x`
///
/// Returns 0.0 for fewer than 2 points.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

/// LF and HF band powers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPowers {
    /// Integrated PSD over [0.04, 0.15] Hz
    pub lf: f64,
    /// Integrated PSD over (0.15, 0.40] Hz
    pub hf: f64,
}

impl BandPowers {
    /// LF/HF ratio, `+∞` when HF power is not positive
    pub fn ratio(&self) -> f64 {
        if self.hf > 0.0 {
            self.lf / self.hf
        } else {
            f64::INFINITY
        }
    }
}

/// Integrate the LF and HF bands of a PSD
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if either band contains no bins
pub fn band_powers(welch: &WelchResult) -> Result<BandPowers, AnalysisError> {
    let lf = welch.lf_band();
    let hf = welch.hf_band();

    if lf.is_empty() || hf.is_empty() {
        return Err(AnalysisError::ProcessingError(
            "No frequencies in the LF or HF band".to_string(),
        ));
    }

    Ok(BandPowers {
        lf: trapezoid(&lf.frequencies, &lf.psd),
        hf: trapezoid(&hf.frequencies, &hf.psd),
    })
}

/// Compute the LF/HF ratio of a PSD
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if either band contains no bins
pub fn lf_hf_ratio(welch: &WelchResult) -> Result<f64, AnalysisError> {
    let powers = band_powers(welch)?;
    log::debug!(
        "Band powers: LF={:.4}, HF={:.4}",
        powers.lf,
        powers.hf
    );
    Ok(powers.ratio())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid() {
        assert_eq!(trapezoid(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]), 1.0);
        assert_eq!(trapezoid(&[0.5], &[3.0]), 0.0);
        assert_eq!(trapezoid(&[], &[]), 0.0);
    }

    #[test]
    fn test_ratio_of_flat_bands() {
        // LF: [0.05, 0.15] width 0.1 at psd 2 -> 0.2; HF: [0.2, 0.4] width 0.2 at psd 1 -> 0.2
        let result = WelchResult::new(
            vec![0.05, 0.1, 0.15, 0.2, 0.3, 0.4],
            vec![2.0, 2.0, 2.0, 1.0, 1.0, 1.0],
        );
        let ratio = lf_hf_ratio(&result).unwrap();
        assert!((ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_hf_power_is_infinite() {
        let result = WelchResult::new(vec![0.05, 0.1, 0.2, 0.3], vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(lf_hf_ratio(&result).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_missing_band_is_error() {
        let result = WelchResult::new(vec![0.05, 0.1], vec![1.0, 1.0]);
        let err = lf_hf_ratio(&result).unwrap_err();
        assert!(matches!(err, AnalysisError::ProcessingError(_)));
    }
}
