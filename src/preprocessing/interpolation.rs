//! Tachogram resampling
//!
//! RR intervals arrive as an irregular event series: each value is the time
//! since the previous beat. Spectral analysis needs a uniformly sampled
//! signal, so the intervals are placed on their own cumulative timeline and
//! interpolated onto a fixed grid.
//!
//! # Example
//!
//! ```
//! use wc_dsp::preprocessing::interpolation::{resample_rr, InterpolationMethod};
//!
//! let rr = vec![800.0, 810.0, 790.0, 805.0];
//! // 4 Hz => one sample every 250 ms over the 2405 ms timeline
//! let resampled = resample_rr(&rr, 4.0, InterpolationMethod::Linear)?;
//! assert_eq!(resampled.len(), 10);
//! # Ok::<(), wc_dsp::AnalysisError>(())
//! ```

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Upper bound on resampled grid length (about 48 days at 4 Hz)
pub const MAX_GRID_SAMPLES: usize = 1 << 24;

/// Interpolation scheme used when resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Piecewise linear, clamped outside the knot range
    Linear,
    /// Natural cubic spline (zero curvature at both ends), clamped outside the knot range
    CubicSpline,
}

/// Cumulative beat timeline, shifted so the first beat sits at t = 0
pub fn cumulative_timeline(rr: &[f64]) -> Vec<f64> {
    let mut t = Vec::with_capacity(rr.len());
    let mut acc = 0.0;
    for &interval in rr {
        acc += interval;
        t.push(acc);
    }
    if let Some(&t0) = t.first() {
        for v in t.iter_mut() {
            *v -= t0;
        }
    }
    t
}

/// Uniform sample points `0, step, 2*step, ...` strictly below `t_end`
///
/// Non-finite arguments yield an empty grid.
pub fn uniform_grid(t_end: f64, step: f64) -> Vec<f64> {
    if !t_end.is_finite() || !step.is_finite() || step <= 0.0 || t_end <= 0.0 {
        return vec![];
    }
    let count = (t_end / step).ceil() as usize;
    (0..count)
        .map(|k| k as f64 * step)
        .filter(|&tau| tau < t_end)
        .collect()
}

/// Linear interpolation of `y(x)` at `xi`
///
/// `x` must be sorted ascending. Values outside `[x[0], x[last]]` are clamped
/// to the end values; duplicated knots resolve to the left value.
pub fn linear_interpolate(x: &[f64], y: &[f64], xi: f64) -> f64 {
    let last = x.len() - 1;
    if xi <= x[0] {
        return y[0];
    }
    if xi >= x[last] {
        return y[last];
    }

    // First knot with x >= xi; xi > x[0] so this is at least 1
    let upper = x.partition_point(|&v| v < xi);
    let i = upper - 1;
    let (x0, x1) = (x[i], x[i + 1]);
    let (y0, y1) = (y[i], y[i + 1]);
    if x1 == x0 {
        return y0;
    }
    let frac = (xi - x0) / (x1 - x0);
    y0 + frac * (y1 - y0)
}

/// Natural cubic spline through a set of strictly increasing knots
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivatives at each knot
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural spline
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` if fewer than 2 knots are given, lengths differ,
    /// or knots are not strictly increasing.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, AnalysisError> {
        if x.len() != y.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "Spline knot length mismatch: x={}, y={}",
                x.len(),
                y.len()
            )));
        }
        let n = x.len();
        if n < 2 {
            return Err(AnalysisError::InvalidInput(
                "Cubic spline needs at least 2 knots".to_string(),
            ));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(AnalysisError::InvalidInput(
                "Cubic spline knots must be strictly increasing".to_string(),
            ));
        }

        let mut m = vec![0.0; n];
        if n > 2 {
            // Tridiagonal system for interior second derivatives (Thomas algorithm)
            let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
            let interior = n - 2;
            let mut diag = vec![0.0; interior];
            let mut upper = vec![0.0; interior];
            let mut rhs = vec![0.0; interior];
            for k in 0..interior {
                let i = k + 1;
                diag[k] = 2.0 * (h[i - 1] + h[i]);
                upper[k] = h[i];
                rhs[k] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
            }
            for k in 1..interior {
                let lower = h[k];
                let w = lower / diag[k - 1];
                diag[k] -= w * upper[k - 1];
                rhs[k] -= w * rhs[k - 1];
            }
            m[interior] = rhs[interior - 1] / diag[interior - 1];
            for k in (0..interior - 1).rev() {
                m[k + 1] = (rhs[k] - upper[k] * m[k + 2]) / diag[k];
            }
        }

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Evaluate the spline at `xi`, clamping outside the knot range
    pub fn evaluate(&self, xi: f64) -> f64 {
        let last = self.x.len() - 1;
        if xi <= self.x[0] {
            return self.y[0];
        }
        if xi >= self.x[last] {
            return self.y[last];
        }

        let i = self.x.partition_point(|&v| v < xi) - 1;
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let a = x1 - xi;
        let b = xi - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

/// Resample an RR series (milliseconds) onto a uniform grid at `fs` Hz
///
/// # Arguments
///
/// * `rr` - RR intervals in milliseconds
/// * `fs` - Target sampling frequency in Hz (grid step is `1000 / fs` ms)
/// * `method` - Interpolation scheme
///
/// # Returns
///
/// RR values sampled on the grid `0, 1000/fs, ...` strictly below the last beat time
///
/// # Errors
///
/// Returns `AnalysisError` if fewer than 2 intervals are given, `fs <= 0`,
/// an interval is not finite, or the grid would exceed [`MAX_GRID_SAMPLES`]
pub fn resample_rr(
    rr: &[f64],
    fs: f64,
    method: InterpolationMethod,
) -> Result<Vec<f64>, AnalysisError> {
    if rr.len() < 2 {
        return Err(AnalysisError::InvalidInput(format!(
            "Resampling needs at least 2 RR intervals, got {}",
            rr.len()
        )));
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Resampling frequency must be finite and > 0, got {}",
            fs
        )));
    }
    if let Some(pos) = rr.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::InvalidInput(format!(
            "RR interval {} is not finite: {}",
            pos, rr[pos]
        )));
    }

    let t = cumulative_timeline(rr);
    let t_end = t[t.len() - 1];
    let step = 1000.0 / fs;
    if !t_end.is_finite() || t_end / step > MAX_GRID_SAMPLES as f64 {
        return Err(AnalysisError::InvalidInput(format!(
            "RR timeline of {} ms at {} Hz exceeds {} samples",
            t_end, fs, MAX_GRID_SAMPLES
        )));
    }
    let grid = uniform_grid(t_end, step);

    log::debug!(
        "Resampling {} RR intervals over {:.1} ms at {:.2} Hz ({:?}) -> {} samples",
        rr.len(),
        t_end,
        fs,
        method,
        grid.len()
    );

    let resampled = match method {
        InterpolationMethod::Linear => grid
            .iter()
            .map(|&tau| linear_interpolate(&t, rr, tau))
            .collect(),
        InterpolationMethod::CubicSpline => {
            let spline = CubicSpline::new(&t, rr)?;
            grid.iter().map(|&tau| spline.evaluate(tau)).collect()
        }
    };

    Ok(resampled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_timeline_starts_at_zero() {
        let t = cumulative_timeline(&[800.0, 900.0, 1000.0]);
        assert_eq!(t, vec![0.0, 900.0, 1900.0]);
    }

    #[test]
    fn test_uniform_grid_excludes_end() {
        assert_eq!(uniform_grid(1000.0, 250.0), vec![0.0, 250.0, 500.0, 750.0]);
        assert_eq!(uniform_grid(1001.0, 250.0).len(), 5);
        assert!(uniform_grid(0.0, 250.0).is_empty());
        assert!(uniform_grid(f64::INFINITY, 250.0).is_empty());
        assert!(uniform_grid(f64::NAN, 250.0).is_empty());
    }

    #[test]
    fn test_linear_interpolate_clamps_and_blends() {
        let x = [0.0, 10.0, 20.0];
        let y = [1.0, 3.0, 2.0];
        assert_eq!(linear_interpolate(&x, &y, -5.0), 1.0);
        assert_eq!(linear_interpolate(&x, &y, 25.0), 2.0);
        assert!((linear_interpolate(&x, &y, 5.0) - 2.0).abs() < 1e-12);
        assert!((linear_interpolate(&x, &y, 15.0) - 2.5).abs() < 1e-12);
        assert_eq!(linear_interpolate(&x, &y, 10.0), 3.0);
    }

    #[test]
    fn test_linear_interpolate_duplicate_knots() {
        let x = [0.0, 5.0, 5.0, 10.0];
        let y = [0.0, 1.0, 7.0, 7.0];
        // Left segment still interpolates normally
        assert!((linear_interpolate(&x, &y, 2.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_spline_passes_through_knots() {
        let x = [0.0, 1.0, 2.5, 4.0, 5.0];
        let y = [1.0, 2.0, 0.5, 3.0, 2.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((spline.evaluate(*xi) - yi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spline_reproduces_straight_line() {
        // Natural spline of linear data has zero curvature everywhere
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert!((spline.evaluate(1.5) - 4.0).abs() < 1e-9);
        assert!((spline.evaluate(2.25) - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_spline_rejects_unsorted_knots() {
        assert!(CubicSpline::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).is_err());
        assert!(CubicSpline::new(&[0.0], &[0.0]).is_err());
    }

    #[test]
    fn test_resample_rr_constant_series() {
        let rr = vec![1000.0; 5];
        for method in [InterpolationMethod::Linear, InterpolationMethod::CubicSpline] {
            let out = resample_rr(&rr, 4.0, method).unwrap();
            // Timeline ends at 4000 ms -> 16 samples
            assert_eq!(out.len(), 16);
            assert!(out.iter().all(|v| (v - 1000.0).abs() < 1e-9));
        }
    }

    #[test]
    fn test_resample_rr_rejects_short_input() {
        assert!(resample_rr(&[800.0], 4.0, InterpolationMethod::Linear).is_err());
        assert!(resample_rr(&[800.0, 900.0], 0.0, InterpolationMethod::Linear).is_err());
    }

    #[test]
    fn test_resample_rr_rejects_non_finite_intervals() {
        for bad in [f64::INFINITY, f64::NAN, f64::NEG_INFINITY] {
            let rr = [800.0, 810.0, bad, 805.0];
            for method in [InterpolationMethod::Linear, InterpolationMethod::CubicSpline] {
                let err = resample_rr(&rr, 4.0, method).unwrap_err();
                assert!(matches!(err, AnalysisError::InvalidInput(_)));
            }
        }
    }

    #[test]
    fn test_resample_rr_rejects_oversized_timeline() {
        let err = resample_rr(&[800.0, 1e15, 805.0], 4.0, InterpolationMethod::Linear).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
        // Overflow of the cumulative sum is caught as well
        assert!(resample_rr(&[f64::MAX, f64::MAX, 1.0], 4.0, InterpolationMethod::Linear).is_err());
    }
}
