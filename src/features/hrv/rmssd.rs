//! Root mean square of successive differences (RMSSD)

use crate::error::AnalysisError;

/// Compute RMSSD of an RR series
///
/// `sqrt(Σ (rr[i] - rr[i-1])² / (n - 1))`
///
/// # Arguments
///
/// * `rr` - RR intervals in milliseconds
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if fewer than 2 intervals are given
///
/// # Example
///
/// ```
/// use wc_dsp::features::hrv::rmssd::rmssd;
///
/// let value = rmssd(&[800.0, 810.0, 800.0])?;
/// assert!((value - 10.0).abs() < 1e-12);
/// # Ok::<(), wc_dsp::AnalysisError>(())
/// ```
pub fn rmssd(rr: &[f64]) -> Result<f64, AnalysisError> {
    if rr.len() < 2 {
        return Err(AnalysisError::InvalidInput(format!(
            "RMSSD needs at least 2 RR intervals, got {}",
            rr.len()
        )));
    }

    let sum_sq: f64 = rr.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    Ok((sum_sq / (rr.len() - 1) as f64).sqrt())
}
