//! Gyroscope CSV reader
//!
//! Expects a header row `time,wx,wy,wz` followed by numeric rows of angular
//! velocity per axis.

use crate::error::AnalysisError;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One gyroscope sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Timestamp as recorded by the device
    pub time: f64,
    /// Angular velocity around x
    pub wx: f64,
    /// Angular velocity around y
    pub wy: f64,
    /// Angular velocity around z
    pub wz: f64,
}

/// Read a gyroscope CSV file
///
/// # Errors
///
/// Returns `AnalysisError` if the file cannot be opened or a row does not parse.
pub fn read_sensor_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SensorSample>, AnalysisError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AnalysisError::IoError(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let samples = read_sensor_samples(BufReader::new(file))?;
    log::info!("Loaded {} sensor samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Read gyroscope samples from any reader
pub fn read_sensor_samples<R: Read>(reader: R) -> Result<Vec<SensorSample>, AnalysisError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<SensorSample>().enumerate() {
        let sample = result.map_err(|e| {
            // 1-based line number, accounting for the header
            AnalysisError::CsvError(format!("Row {}: {}", row_idx + 2, e))
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
