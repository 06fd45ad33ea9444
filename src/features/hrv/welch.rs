//! Welch power spectral density estimate
//!
//! Splits the signal into overlapping segments, removes each segment's mean,
//! applies a Hamming window, zero-pads to `nfft` and averages the one-sided
//! periodograms.
//!
//! # Reference
//!
//! Welch, P. (1967). The use of fast Fourier transform for the estimation of power spectra.
//! *IEEE Transactions on Audio and Electroacoustics*, 15(2), 70-73.
//!
//! # Algorithm
//!
//! 1. Segment: `segment_length` samples, hop `segment_length - overlap`
//! 2. Per segment: `x = (s - mean(s)) * w` over the first `min(segment_length, nfft)`
//!    samples, zero-padded to `nfft`
//! 3. Periodogram: `P[k] = |FFT(x)[k]|² / (fs * Σw²)`, doubled except DC and Nyquist
//! 4. Average over segments
//!
//! # Example
//!
//! ```no_run
//! use wc_dsp::features::hrv::welch::{welch_psd, WelchConfig};
//!
//! let signal = vec![0.0f64; 1200];
//! let psd = welch_psd(&signal, 4.0, &WelchConfig::default())?;
//! let lf = psd.lf_band();
//! # Ok::<(), wc_dsp::AnalysisError>(())
//! ```

use crate::config::HrvConfig;
use crate::error::AnalysisError;
use crate::preprocessing::window::{hamming_window, window_power};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Low-frequency band limits in Hz (inclusive on both ends)
pub const LF_BAND: (f64, f64) = (0.04, 0.15);

/// High-frequency band limits in Hz (exclusive lower, inclusive upper)
pub const HF_BAND: (f64, f64) = (0.15, 0.40);

/// Welch estimator parameters
#[derive(Debug, Clone)]
pub struct WelchConfig {
    /// FFT length per segment (default: 4096)
    pub nfft: usize,
    /// Segment length in samples (default: 256)
    pub segment_length: usize,
    /// Overlap between segments in samples (default: 128)
    pub overlap: usize,
}

impl Default for WelchConfig {
    fn default() -> Self {
        Self {
            nfft: 4096,
            segment_length: 256,
            overlap: 128,
        }
    }
}

impl From<&HrvConfig> for WelchConfig {
    fn from(config: &HrvConfig) -> Self {
        Self {
            nfft: config.nfft,
            segment_length: config.segment_length,
            overlap: config.segment_overlap,
        }
    }
}

/// Frequencies and PSD values for a contiguous frequency range
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Band {
    /// Bin frequencies in Hz
    pub frequencies: Vec<f64>,
    /// PSD values at those frequencies
    pub psd: Vec<f64>,
}

impl Band {
    /// Number of bins in the band
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the band contains no bins
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// One-sided PSD estimate
#[derive(Debug, Clone)]
pub struct WelchResult {
    /// Bin frequencies in Hz, `k * fs / nfft` for `k = 0..=nfft/2`
    pub frequencies: Vec<f64>,
    /// Power spectral density per bin (signal units² / Hz)
    pub psd: Vec<f64>,
}

impl WelchResult {
    /// Build a result from precomputed bins
    pub fn new(frequencies: Vec<f64>, psd: Vec<f64>) -> Self {
        Self { frequencies, psd }
    }

    /// Bins whose frequency lies in the band
    ///
    /// The upper limit is always inclusive; the lower limit is inclusive when
    /// `low_inclusive` is set.
    pub fn band(&self, low: f64, high: f64, low_inclusive: bool) -> Band {
        let mut band = Band::default();
        for (&f, &p) in self.frequencies.iter().zip(self.psd.iter()) {
            let above_low = if low_inclusive { f >= low } else { f > low };
            if above_low && f <= high {
                band.frequencies.push(f);
                band.psd.push(p);
            }
        }
        band
    }

    /// Low-frequency band [0.04, 0.15] Hz
    pub fn lf_band(&self) -> Band {
        self.band(LF_BAND.0, LF_BAND.1, true)
    }

    /// High-frequency band (0.15, 0.40] Hz
    ///
    /// Disjoint from the LF band, so a bin at exactly 0.15 Hz counts only as LF.
    pub fn hf_band(&self) -> Band {
        self.band(HF_BAND.0, HF_BAND.1, false)
    }
}

/// Compute the Welch PSD of a uniformly sampled signal
///
/// # Arguments
///
/// * `signal` - Uniformly sampled signal
/// * `fs` - Sampling frequency in Hz
/// * `config` - Segment and FFT parameters
///
/// # Returns
///
/// `WelchResult` with `nfft / 2 + 1` bins
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - Signal is empty
/// - `fs <= 0` or `nfft == 0`
/// - Overlap is not smaller than the segment length
/// - Window power is zero
pub fn welch_psd(
    signal: &[f64],
    fs: f64,
    config: &WelchConfig,
) -> Result<WelchResult, AnalysisError> {
    if signal.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Signal is empty".to_string(),
        ));
    }
    if fs <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Sampling frequency must be > 0, got {}",
            fs
        )));
    }
    if config.nfft == 0 || config.segment_length == 0 {
        return Err(AnalysisError::InvalidInput(
            "nfft and segment length must be > 0".to_string(),
        ));
    }
    if config.overlap >= config.segment_length {
        return Err(AnalysisError::InvalidInput(format!(
            "Overlap ({}) must be smaller than segment length ({})",
            config.overlap, config.segment_length
        )));
    }

    // Short signals collapse to a single segment with half overlap
    let segment_length = config.segment_length.min(signal.len());
    let overlap = if segment_length < config.segment_length {
        segment_length / 2
    } else {
        config.overlap
    };
    let step = segment_length - overlap;
    let num_segments = (signal.len() - segment_length) / step + 1;

    // Only the first nfft samples of each segment are transformed
    let used_length = segment_length.min(config.nfft);
    let window = hamming_window(used_length);
    let scale = fs * window_power(&window);
    if scale <= 0.0 {
        return Err(AnalysisError::NumericalError(
            "Window power is zero".to_string(),
        ));
    }

    let nfft = config.nfft;
    let num_bins = nfft / 2 + 1;

    log::debug!(
        "Welch PSD: {} samples at {:.2} Hz, {} segments of {} (overlap {}), nfft={}",
        signal.len(),
        fs,
        num_segments,
        segment_length,
        overlap,
        nfft
    );

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(nfft);
    let mut buffer = vec![Complex::new(0.0, 0.0); nfft];
    let mut psd = vec![0.0; num_bins];

    for seg in 0..num_segments {
        let start = seg * step;
        let segment = &signal[start..start + used_length];
        let mean = segment.iter().sum::<f64>() / used_length as f64;

        for (slot, (&x, &w)) in buffer.iter_mut().zip(segment.iter().zip(window.iter())) {
            *slot = Complex::new((x - mean) * w, 0.0);
        }
        for slot in buffer.iter_mut().skip(used_length) {
            *slot = Complex::new(0.0, 0.0);
        }

        fft.process(&mut buffer);

        for (k, p) in psd.iter_mut().enumerate() {
            *p += buffer[k].norm_sqr();
        }
    }

    let has_nyquist = nfft % 2 == 0;
    for (k, p) in psd.iter_mut().enumerate() {
        *p /= scale * num_segments as f64;
        let is_dc = k == 0;
        let is_nyquist = has_nyquist && k == num_bins - 1;
        if !is_dc && !is_nyquist {
            *p *= 2.0;
        }
    }

    let df = fs / nfft as f64;
    let frequencies = (0..num_bins).map(|k| k as f64 * df).collect();

    Ok(WelchResult { frequencies, psd })
}
