//! Configuration parameters for the analysis pipelines

use crate::preprocessing::interpolation::InterpolationMethod;
use serde::{Deserialize, Serialize};

/// HRV analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HrvConfig {
    /// Resampling frequency for the RR tachogram in Hz (default: 4.0)
    pub resample_hz: f64,

    /// Interpolation used when resampling (default: Linear)
    pub interpolation: InterpolationMethod,

    /// FFT length per Welch segment (default: 4096)
    pub nfft: usize,

    /// Welch segment length in samples (default: 256)
    pub segment_length: usize,

    /// Overlap between Welch segments in samples (default: 128)
    pub segment_overlap: usize,

    /// Minimum patient age in years (default: 18.0)
    pub min_age_years: f64,
}

impl Default for HrvConfig {
    fn default() -> Self {
        Self {
            resample_hz: 4.0,
            interpolation: InterpolationMethod::Linear,
            nfft: 4096,
            segment_length: 256,
            segment_overlap: 128,
            min_age_years: 18.0,
        }
    }
}

/// Step counting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Gyroscope sampling frequency in Hz (default: 100.0)
    pub sampling_frequency: f64,

    /// FFT window size in samples (default: 512)
    pub window_size: usize,

    /// Sliding window duration in seconds (default: 1.25)
    /// The hop between windows is `window_duration * sampling_frequency` samples
    pub window_duration: f64,

    /// Minimum mean gait-band magnitude for a window to count (default: 10.0)
    pub min_gait_magnitude: f64,

    /// Golden-section search tolerance (default: 1e-5)
    pub search_tolerance: f64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            sampling_frequency: 100.0,
            window_size: 512,
            window_duration: 1.25,
            min_gait_magnitude: 10.0,
            search_tolerance: 1e-5,
        }
    }
}

impl StepConfig {
    /// Hop between consecutive windows in samples
    pub fn hop_size(&self) -> usize {
        (self.window_duration * self.sampling_frequency) as usize
    }

    /// FFT bin width in Hz
    pub fn resolution(&self) -> f64 {
        self.sampling_frequency / self.window_size as f64
    }
}

/// Energy expenditure configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Heart-rate samples with |z| at or above this are dropped (default: 3.0)
    pub hr_zscore_limit: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            hr_zscore_limit: 3.0,
        }
    }
}

/// Combined configuration, loadable from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// HRV pipeline settings
    pub hrv: HrvConfig,

    /// Step counter settings
    pub steps: StepConfig,

    /// Energy expenditure settings
    pub energy: EnergyConfig,
}

impl AnalysisConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, crate::error::AnalysisError> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            crate::error::AnalysisError::InvalidInput(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
