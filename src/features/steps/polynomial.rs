//! Polynomial fitting and bounded maximisation
//!
//! Used to locate the gait frequency between FFT bins: a polynomial is fitted
//! through the gait-band magnitudes and its maximum is found by golden-section
//! search.
//!
//! # Example
//!
//! ```
//! use wc_dsp::features::steps::polynomial::{golden_section_max, polyfit, polyval};
//!
//! // Parabola with its vertex at x = 3
//! let coeffs = polyfit(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.0, 3.0, 4.0, 3.0, 0.0], 2)?;
//! let peak = golden_section_max(|x| polyval(&coeffs, x), 1.0, 5.0, 1e-6);
//! assert!((peak - 3.0).abs() < 1e-4);
//! # Ok::<(), wc_dsp::AnalysisError>(())
//! ```

use crate::error::AnalysisError;

/// Relative column norm below which the fit is treated as singular
const SINGULAR_EPSILON: f64 = 1e-12;

/// Least-squares polynomial fit
///
/// # Arguments
///
/// * `x` - Sample positions
/// * `y` - Sample values
/// * `degree` - Polynomial degree
///
/// # Returns
///
/// `degree + 1` coefficients, highest power first
///
/// # Errors
///
/// Returns `AnalysisError` if lengths differ, fewer than `degree + 1` points
/// are given, or the system is singular (e.g. repeated x positions).
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>, AnalysisError> {
    if x.len() != y.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "polyfit length mismatch: x={}, y={}",
            x.len(),
            y.len()
        )));
    }
    let terms = degree + 1;
    if x.len() < terms {
        return Err(AnalysisError::InvalidInput(format!(
            "polyfit of degree {} needs at least {} points, got {}",
            degree,
            terms,
            x.len()
        )));
    }

    // Vandermonde matrix with ascending powers: a[i][j] = x_i^j
    let mut matrix: Vec<Vec<f64>> = x
        .iter()
        .map(|&xi| {
            let mut p = 1.0;
            (0..terms)
                .map(|_| {
                    let v = p;
                    p *= xi;
                    v
                })
                .collect()
        })
        .collect();
    let mut rhs = y.to_vec();

    let ascending = solve_least_squares(&mut matrix, &mut rhs)?;
    Ok(ascending.into_iter().rev().collect())
}

/// Householder QR least squares for an m x n system (m >= n)
///
/// Overwrites `matrix` with R and `rhs` with Q^T b.
fn solve_least_squares(matrix: &mut [Vec<f64>], rhs: &mut [f64]) -> Result<Vec<f64>, AnalysisError> {
    let m = matrix.len();
    let n = matrix.first().map(|row| row.len()).unwrap_or(0);

    let column_norms: Vec<f64> = (0..n)
        .map(|j| matrix.iter().map(|row| row[j] * row[j]).sum::<f64>().sqrt())
        .collect();

    for k in 0..n {
        let norm = (k..m).map(|i| matrix[i][k] * matrix[i][k]).sum::<f64>().sqrt();
        if norm <= SINGULAR_EPSILON * column_norms[k].max(1.0) {
            return Err(AnalysisError::NumericalError(
                "Singular system in polynomial fit".to_string(),
            ));
        }

        let alpha = if matrix[k][k] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (k..m).map(|i| matrix[i][k]).collect();
        v[0] -= alpha;
        let v_norm_sq: f64 = v.iter().map(|vi| vi * vi).sum();
        if v_norm_sq == 0.0 {
            continue;
        }

        for j in k..n {
            let s: f64 = v.iter().enumerate().map(|(i, vi)| vi * matrix[k + i][j]).sum();
            let factor = 2.0 * s / v_norm_sq;
            for (i, vi) in v.iter().enumerate() {
                matrix[k + i][j] -= factor * vi;
            }
        }
        let s: f64 = v.iter().enumerate().map(|(i, vi)| vi * rhs[k + i]).sum();
        let factor = 2.0 * s / v_norm_sq;
        for (i, vi) in v.iter().enumerate() {
            rhs[k + i] -= factor * vi;
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    Ok(solution)
}

/// Evaluate a polynomial (highest power first) with Horner's method
pub fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Golden-section search for the maximiser of `f` on `[a, b]`
///
/// Assumes `f` is unimodal on the interval. Returns the midpoint of the final
/// bracket once it is narrower than `tol`.
pub fn golden_section_max<F>(f: F, mut a: f64, mut b: f64, tol: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let gr = (5.0f64.sqrt() + 1.0) / 2.0;

    let mut c = b - (b - a) / gr;
    let mut d = a + (b - a) / gr;

    while (c - d).abs() > tol {
        // Minimising -f keeps the bracket on the larger value
        if -f(c) < -f(d) {
            b = d;
        } else {
            a = c;
        }
        c = b - (b - a) / gr;
        d = a + (b - a) / gr;
    }

    (a + b) / 2.0
}
