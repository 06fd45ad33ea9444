//! Error types for the analysis pipelines

use std::fmt;

/// Errors that can occur while loading or analysing sensor data
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Invalid input parameters or malformed values
    InvalidInput(String),

    /// File system error (missing file, unreadable directory, ...)
    IoError(String),

    /// CSV parsing or writing error
    CsvError(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Numerical error (singular system, non-finite result, ...)
    NumericalError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::IoError(msg) => write!(f, "I/O error: {}", msg),
            AnalysisError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::CsvError(err.to_string())
    }
}
