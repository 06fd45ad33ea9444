//! Window functions for spectral estimation

use std::f64::consts::PI;

/// Hamming window coefficient: `w(n) = 0.54 - 0.46 * cos(2πn / (N - 1))`
///
/// Returns 1.0 for degenerate windows (`len <= 1`).
pub fn hamming(n: usize, len: usize) -> f64 {
    if len <= 1 {
        return 1.0;
    }
    0.54 - 0.46 * ((2.0 * PI * n as f64) / (len - 1) as f64).cos()
}

/// Full symmetric Hamming window of length `len`
pub fn hamming_window(len: usize) -> Vec<f64> {
    (0..len).map(|n| hamming(n, len)).collect()
}

/// Window power `Σ w²`, used for PSD density scaling
pub fn window_power(window: &[f64]) -> f64 {
    window.iter().map(|w| w * w).sum()
}
