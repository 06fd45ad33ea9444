//! Analysis result types

use crate::features::steps::axis::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Patient gender as recorded in the metadata CSV
///
/// Anything other than `"M"` or `"F"` (including an empty cell or a missing
/// column) maps to `NotAvailable`, which renders as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Gender {
    /// "M"
    Male,
    /// "F"
    Female,
    /// Unknown or not recorded
    NotAvailable,
}

impl Gender {
    /// Parse a raw CSV cell
    ///
    /// # Example
    ///
    /// ```
    /// use wc_dsp::analysis::result::Gender;
    ///
    /// assert_eq!(Gender::from_value("M"), Gender::Male);
    /// assert_eq!(Gender::from_value(" F "), Gender::Female);
    /// assert_eq!(Gender::from_value("n/a"), Gender::NotAvailable);
    /// ```
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "M" => Gender::Male,
            "F" => Gender::Female,
            _ => Gender::NotAvailable,
        }
    }

    /// CSV representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::NotAvailable => "",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::from_value(&value)
    }
}

/// Per-patient HRV analysis result
///
/// Field names serialize to the results CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// RR file identifier (e.g. "ID1")
    #[serde(rename = "File")]
    pub file_id: String,

    /// Age in years
    #[serde(rename = "Age (years)")]
    pub age: f64,

    /// Recorded gender
    #[serde(rename = "Gender")]
    pub gender: Gender,

    /// Root mean square of successive RR differences in milliseconds
    #[serde(rename = "RMSSD (ms)")]
    pub rmssd: f64,

    /// Respiration rate estimated from the HF peak, breaths per minute
    #[serde(rename = "Resp Rate (bpm)")]
    pub respiration_rate_bpm: f64,

    /// Ratio of LF to HF spectral power
    #[serde(rename = "LF/HF Ratio")]
    pub lf_hf_ratio: f64,
}

/// Contribution of a single sliding window to the step count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepWindow {
    /// Index of the first sample in the window
    pub start_index: usize,

    /// Axis with the largest mean absolute angular velocity
    pub axis: Axis,

    /// Mean magnitude of the two lowest FFT bins
    pub w0: f64,

    /// Mean magnitude of the gait band (bins 2..7)
    pub wc: f64,

    /// Position of the fitted gait peak on the 1..=5 bin scale
    pub peak_position: f64,

    /// Steps counted in this window (0.0 when the window is rejected)
    pub steps: f64,
}

impl StepWindow {
    /// Whether this window contributed steps
    pub fn is_walking(&self) -> bool {
        self.steps > 0.0
    }
}

/// Step counting result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepCountResult {
    /// Estimated number of steps
    pub total_steps: f64,

    /// Every analysed window, in signal order
    pub windows: Vec<StepWindow>,
}

/// Energy expenditure estimate for one measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    /// Exercise test identifier
    #[serde(rename = "ID_test")]
    pub id_test: String,

    /// Heart rate in beats per minute
    #[serde(rename = "HR")]
    pub hr: f64,

    /// 1 = male, 0 = female
    #[serde(rename = "Sex")]
    pub sex: f64,

    /// Age in years
    #[serde(rename = "Age")]
    pub age: f64,

    /// Body weight in kg
    #[serde(rename = "Weight")]
    pub weight: f64,

    /// Maximum oxygen uptake for the test in ml/kg/min
    #[serde(rename = "VO2_max")]
    pub vo2_max: f64,

    /// Energy expenditure from Weir's equation in kJ/min
    #[serde(rename = "EE_Weir")]
    pub ee_weir: f64,

    /// Energy expenditure from Keytel's equation in kJ/min
    #[serde(rename = "EE_Keytel")]
    pub ee_keytel: f64,
}
