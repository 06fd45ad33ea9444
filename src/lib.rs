//! # WC DSP
//!
//! Signal analysis for wearable computing: heart-rate variability, gyroscope
//! step counting and exercise energy expenditure.
//!
//! ## Features
//!
//! - **HRV**: RMSSD, Welch PSD of the resampled tachogram, respiration rate from the HF peak, LF/HF ratio
//! - **Step counting**: sliding-window FFT on the dominant gyroscope axis with polynomial peak refinement
//! - **Energy expenditure**: Weir (gas exchange) and Keytel (heart rate) equations with z-score outlier removal
//! - **Batch processing**: patients analysed in parallel with rayon, results written as CSV
//!
//! ## Quick Start
//!
//! ```no_run
//! use wc_dsp::{analyze_rr, HrvConfig};
//!
//! // RR intervals in milliseconds
//! let rr: Vec<f64> = vec![812.0, 798.0, 805.0]; // Your recording
//!
//! let metrics = analyze_rr(&rr, &HrvConfig::default())?;
//!
//! println!("RMSSD: {:.2} ms", metrics.rmssd);
//! println!("Respiration: {:.1} bpm, LF/HF: {:.2}", metrics.respiration_rate_bpm, metrics.lf_hf_ratio);
//! # Ok::<(), wc_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! CSV / text input → Preprocessing → Feature Extraction → Results → CSV output
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::metadata::BatchMetadata;
pub use analysis::result::{AnalysisResult, EnergyEstimate, Gender, StepCountResult, StepWindow};
pub use config::{AnalysisConfig, EnergyConfig, HrvConfig, StepConfig};
pub use error::AnalysisError;
pub use features::energy::estimate_energy_expenditure;
pub use features::hrv::{analyze_patients, analyze_patients_detailed, analyze_rr, HrvBatch, HrvMetrics};
pub use features::steps::count_steps;
