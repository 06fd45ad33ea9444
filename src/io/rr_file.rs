//! RR interval text file reader (one interval in milliseconds per line)

use crate::error::AnalysisError;
use std::path::Path;

/// Read RR intervals from a plain text file
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
///
/// # Errors
///
/// Returns `AnalysisError` if the file cannot be read or a line is not a number.
pub fn read_rr_intervals<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, AnalysisError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AnalysisError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_rr_intervals(&contents).map_err(|e| match e {
        AnalysisError::InvalidInput(msg) => {
            AnalysisError::InvalidInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse RR intervals from text
///
/// `inf` and `NaN` parse as floats but are rejected like any other bad line.
pub fn parse_rr_intervals(contents: &str) -> Result<Vec<f64>, AnalysisError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let text = line.trim();
            let value = text.parse::<f64>().map_err(|_| {
                AnalysisError::InvalidInput(format!("line {}: not a number: {:?}", idx + 1, text))
            })?;
            if !value.is_finite() {
                return Err(AnalysisError::InvalidInput(format!(
                    "line {}: non-finite RR interval: {:?}",
                    idx + 1,
                    text
                )));
            }
            Ok(value)
        })
        .collect()
}
