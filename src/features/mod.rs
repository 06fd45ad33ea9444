//! Feature extraction modules
//!
//! This module contains the analysis algorithms:
//! - HRV metrics (RMSSD, Welch PSD, respiration rate, LF/HF)
//! - Step counting from gyroscope data
//! - Energy expenditure (Weir, Keytel)

pub mod energy;
pub mod hrv;
pub mod steps;
