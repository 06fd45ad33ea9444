//! Magnitude spectrum of a gyroscope window

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Compute `2 * |FFT(signal)|` for every bin
///
/// No window or normalisation is applied; the returned vector has the same
/// length as the input.
pub fn magnitude_spectrum(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return vec![];
    }

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    buffer.iter().map(|c| 2.0 * c.norm()).collect()
}
