//! CSV result writers

use crate::analysis::result::{AnalysisResult, EnergyEstimate};
use crate::error::AnalysisError;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_rows<T: Serialize, W: Write>(writer: W, rows: &[T]) -> Result<(), AnalysisError> {
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| AnalysisError::IoError(format!("Failed to flush CSV: {}", e)))
}

fn create(path: &Path) -> Result<BufWriter<File>, AnalysisError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| AnalysisError::IoError(format!("Failed to create {}: {}", path.display(), e)))
}

/// Write per-patient HRV results with a header row, in the given order
pub fn write_results<P: AsRef<Path>>(
    path: P,
    results: &[AnalysisResult],
) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    write_results_to(create(path)?, results)?;
    log::info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}

/// Write per-patient HRV results to any writer
pub fn write_results_to<W: Write>(
    writer: W,
    results: &[AnalysisResult],
) -> Result<(), AnalysisError> {
    write_rows(writer, results)
}

/// Write energy expenditure estimates with a header row
pub fn write_energy_estimates<P: AsRef<Path>>(
    path: P,
    estimates: &[EnergyEstimate],
) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    write_rows(create(path)?, estimates)?;
    log::info!("Wrote {} estimates to {}", estimates.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::Gender;

    #[test]
    fn test_write_results_header_and_rows() {
        let results = vec![
            AnalysisResult {
                file_id: "ID1".to_string(),
                age: 30.0,
                gender: Gender::Male,
                rmssd: 42.5,
                respiration_rate_bpm: 15.0,
                lf_hf_ratio: 2.0,
            },
            AnalysisResult {
                file_id: "ID2".to_string(),
                age: 55.0,
                gender: Gender::NotAvailable,
                rmssd: 20.0,
                respiration_rate_bpm: 12.5,
                lf_hf_ratio: f64::INFINITY,
            },
        ];

        let mut buf = Vec::new();
        write_results_to(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "File,Age (years),Gender,RMSSD (ms),Resp Rate (bpm),LF/HF Ratio"
        );
        assert_eq!(lines[1], "ID1,30.0,M,42.5,15.0,2.0");
        assert!(lines[2].starts_with("ID2,55.0,,20.0,12.5,"));
    }
}
