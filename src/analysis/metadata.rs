//! Batch run metadata

use serde::{Deserialize, Serialize};

/// Why a patient row produced no result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Row has no usable file identifier
    InvalidRow(String),
    /// Age missing, non-numeric or below the adult threshold
    InvalidAge(String),
    /// No RR file for this patient in the data directory
    MissingRrFile(String),
    /// RR file could not be read or analysed
    AnalysisFailed(String),
}

/// A skipped patient row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPatient {
    /// File identifier from the metadata CSV
    pub file_id: String,
    /// Reason the row was skipped
    pub reason: SkipReason,
}

/// Summary of an HRV batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// Crate version that produced the results
    pub algorithm_version: String,

    /// Number of rows in the metadata CSV
    pub patients_total: usize,

    /// Number of rows that produced a result
    pub patients_analyzed: usize,

    /// Rows that were skipped, in input order
    pub skipped: Vec<SkippedPatient>,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,
}

impl Default for BatchMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            patients_total: 0,
            patients_analyzed: 0,
            skipped: vec![],
            processing_time_ms: 0.0,
        }
    }
}
