//! Exercise test CSV readers
//!
//! Two inputs feed the energy expenditure pipeline: per-sample measurements
//! (`ID_test, HR, VO2, VCO2, ...`) and per-test subject information
//! (`ID_test, Sex, Age, Weight, ...`). Columns are matched by header name;
//! unrelated columns are ignored and empty cells become `None`.
//!
//! A measurement row with an empty cell in any column, used or not, is
//! marked incomplete and later excluded from the merge.

use crate::error::AnalysisError;
use csv::{Reader, ReaderBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One measurement sample from an exercise test
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    /// Exercise test identifier
    #[serde(rename = "ID_test")]
    pub id_test: String,
    /// Heart rate in beats per minute
    #[serde(rename = "HR", default)]
    pub hr: Option<f64>,
    /// Oxygen uptake in ml/min
    #[serde(rename = "VO2", default)]
    pub vo2: Option<f64>,
    /// Carbon dioxide output in ml/min
    #[serde(rename = "VCO2", default)]
    pub vco2: Option<f64>,
    /// Every cell of the source row was present
    #[serde(skip)]
    pub complete: bool,
}

/// Subject information for an exercise test
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subject {
    /// Exercise test identifier
    #[serde(rename = "ID_test")]
    pub id_test: String,
    /// Sex as recorded (0 = male, 1 = female)
    #[serde(rename = "Sex", default)]
    pub sex: Option<f64>,
    /// Age in years
    #[serde(rename = "Age", default)]
    pub age: Option<f64>,
    /// Body weight in kg
    #[serde(rename = "Weight", default)]
    pub weight: Option<f64>,
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn row_error(row_idx: usize, e: csv::Error) -> AnalysisError {
    AnalysisError::CsvError(format!("Row {}: {}", row_idx + 2, e))
}

fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, AnalysisError> {
    csv_reader(reader)
        .deserialize::<T>()
        .enumerate()
        .map(|(row_idx, row)| row.map_err(|e| row_error(row_idx, e)))
        .collect()
}

fn open(path: &Path) -> Result<BufReader<File>, AnalysisError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| AnalysisError::IoError(format!("Failed to open {}: {}", path.display(), e)))
}

/// Read exercise measurements
pub fn read_measurements<P: AsRef<Path>>(path: P) -> Result<Vec<Measurement>, AnalysisError> {
    read_measurement_rows(open(path.as_ref())?)
}

/// Read exercise measurements from any reader
pub fn read_measurement_rows<R: Read>(reader: R) -> Result<Vec<Measurement>, AnalysisError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();

    reader
        .records()
        .enumerate()
        .map(|(row_idx, record)| {
            let record = record.map_err(|e| row_error(row_idx, e))?;
            let mut measurement: Measurement = record
                .deserialize(Some(&headers))
                .map_err(|e| row_error(row_idx, e))?;
            measurement.complete =
                record.len() == headers.len() && record.iter().all(|cell| !cell.is_empty());
            Ok(measurement)
        })
        .collect()
}

/// Read subject information
pub fn read_subjects<P: AsRef<Path>>(path: P) -> Result<Vec<Subject>, AnalysisError> {
    read_subject_rows(open(path.as_ref())?)
}

/// Read subject information from any reader
pub fn read_subject_rows<R: Read>(reader: R) -> Result<Vec<Subject>, AnalysisError> {
    read_rows(reader)
}
