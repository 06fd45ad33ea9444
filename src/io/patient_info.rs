//! Patient metadata CSV reader
//!
//! The metadata file has one row per recording. Columns are located by header
//! name (case-insensitive), so extra columns and arbitrary column order are
//! accepted:
//!
//! ```text
//! File,Age (years),Gender,...
//! ID1,34,M,...
//! ID2,0.5,F,...
//! ```

use crate::analysis::result::Gender;
use crate::error::AnalysisError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const FILE_COLUMN: &str = "File";
const AGE_COLUMN: &str = "Age (years)";
const GENDER_COLUMN: &str = "Gender";

/// Unvalidated patient row
///
/// The age is kept as its raw string; validation happens per row so that a
/// single bad cell only skips that patient.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRow {
    /// RR file identifier
    pub file_id: String,
    /// Raw age cell
    pub age_raw: String,
    /// Parsed gender (`NotAvailable` when the column is absent)
    pub gender: Gender,
}

/// Validated patient record
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    /// RR file identifier
    pub file_id: String,
    /// Age in years
    pub age: f64,
    /// Recorded gender
    pub gender: Gender,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    file: usize,
    age: usize,
    gender: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &StringRecord) -> Result<Self, AnalysisError> {
        let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));

        match (find(FILE_COLUMN), find(AGE_COLUMN)) {
            (Some(file), Some(age)) => Ok(Self {
                file,
                age,
                gender: find(GENDER_COLUMN),
            }),
            _ => Err(AnalysisError::InvalidInput(format!(
                "Could not find '{}' or '{}' in CSV header",
                FILE_COLUMN, AGE_COLUMN
            ))),
        }
    }
}

/// Read the patient metadata CSV
///
/// # Errors
///
/// Returns `AnalysisError` if the file cannot be opened, is empty, lacks the
/// `File` or `Age (years)` column, or is not valid CSV.
pub fn read_patient_info<P: AsRef<Path>>(path: P) -> Result<Vec<PatientRow>, AnalysisError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AnalysisError::IoError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(AnalysisError::InvalidInput(format!(
            "Empty CSV file {}",
            path.display()
        )));
    }
    let columns = ColumnIndex::from_header(&header)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();

        rows.push(PatientRow {
            file_id: cell(columns.file),
            age_raw: cell(columns.age),
            gender: columns
                .gender
                .map(|idx| Gender::from_value(record.get(idx).unwrap_or("")))
                .unwrap_or(Gender::NotAvailable),
        });
    }

    log::debug!("Read {} patient rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse and validate an age cell
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for non-numeric values or ages below `min_age`.
pub fn validate_age(raw: &str, min_age: f64) -> Result<f64, AnalysisError> {
    let age: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AnalysisError::InvalidInput(format!("Invalid age: {}", raw)))?;

    if !age.is_finite() {
        return Err(AnalysisError::InvalidInput(format!("Invalid age: {}", raw)));
    }
    if age < min_age {
        return Err(AnalysisError::InvalidInput(format!(
            "Age must be at least {} years, got {}",
            min_age, age
        )));
    }
    Ok(age)
}

impl PatientRow {
    /// Validate this row into a record
    pub fn validate(&self, min_age: f64) -> Result<PatientRecord, AnalysisError> {
        if self.file_id.is_empty() {
            return Err(AnalysisError::InvalidInput("Empty file identifier".to_string()));
        }
        Ok(PatientRecord {
            file_id: self.file_id.clone(),
            age: validate_age(&self.age_raw, min_age)?,
            gender: self.gender,
        })
    }
}
