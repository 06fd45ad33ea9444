//! Heart-rate variability analysis
//!
//! Per-recording pipeline:
//! 1. RMSSD on the raw RR series (time domain)
//! 2. Resample the tachogram onto a uniform grid
//! 3. Welch PSD
//! 4. Respiration rate (HF peak) and LF/HF ratio (band powers)
//!
//! The batch entry point reads a patient metadata CSV, locates each patient's
//! RR file and analyses adults in parallel.

pub mod lf_hf;
pub mod respiration;
pub mod rmssd;
pub mod welch;

use crate::analysis::metadata::{BatchMetadata, SkipReason, SkippedPatient};
use crate::analysis::result::AnalysisResult;
use crate::config::HrvConfig;
use crate::error::AnalysisError;
use crate::io::patient_info::{read_patient_info, PatientRow};
use crate::io::rr_file::read_rr_intervals;
use crate::preprocessing::interpolation::resample_rr;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use welch::{welch_psd, WelchConfig};

/// HRV metrics for one RR recording
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HrvMetrics {
    /// RMSSD in milliseconds
    pub rmssd: f64,
    /// Respiration rate in breaths per minute
    pub respiration_rate_bpm: f64,
    /// LF/HF power ratio
    pub lf_hf_ratio: f64,
}

/// Analyse a single RR series
///
/// # Errors
///
/// Returns `AnalysisError` if the series is too short or the spectrum has no
/// LF or HF content.
pub fn analyze_rr(rr: &[f64], config: &HrvConfig) -> Result<HrvMetrics, AnalysisError> {
    let rmssd = rmssd::rmssd(rr)?;

    let resampled = resample_rr(rr, config.resample_hz, config.interpolation)?;
    let psd = welch_psd(&resampled, config.resample_hz, &WelchConfig::from(config))?;

    let respiration_rate_bpm = respiration::respiration_rate(&psd)?;
    let lf_hf_ratio = lf_hf::lf_hf_ratio(&psd)?;

    Ok(HrvMetrics {
        rmssd,
        respiration_rate_bpm,
        lf_hf_ratio,
    })
}

/// HRV batch output
#[derive(Debug, Clone)]
pub struct HrvBatch {
    /// Results for analysed patients, in metadata order
    pub results: Vec<AnalysisResult>,
    /// Run summary including skipped rows
    pub metadata: BatchMetadata,
}

enum PatientOutcome {
    Analyzed(AnalysisResult),
    Skipped(SkippedPatient),
}

fn rr_path(data_dir: &Path, file_id: &str) -> PathBuf {
    data_dir.join(format!("{}.txt", file_id))
}

fn analyze_row(row: &PatientRow, data_dir: &Path, config: &HrvConfig) -> PatientOutcome {
    let skip = |reason: SkipReason| {
        PatientOutcome::Skipped(SkippedPatient {
            file_id: row.file_id.clone(),
            reason,
        })
    };

    if row.file_id.is_empty() {
        log::debug!("Skipping row with empty file identifier");
        return skip(SkipReason::InvalidRow("Empty file identifier".to_string()));
    }

    let record = match row.validate(config.min_age_years) {
        Ok(record) => record,
        Err(e) => {
            log::debug!("Skipping {}: {}", row.file_id, e);
            return skip(SkipReason::InvalidAge(e.to_string()));
        }
    };

    let path = rr_path(data_dir, &record.file_id);
    if !path.exists() {
        log::info!("Skipping {}: RR file {} not found", record.file_id, path.display());
        return skip(SkipReason::MissingRrFile(path.display().to_string()));
    }

    let metrics = read_rr_intervals(&path).and_then(|rr| analyze_rr(&rr, config));
    match metrics {
        Ok(m) => PatientOutcome::Analyzed(AnalysisResult {
            file_id: record.file_id,
            age: record.age,
            gender: record.gender,
            rmssd: m.rmssd,
            respiration_rate_bpm: m.respiration_rate_bpm,
            lf_hf_ratio: m.lf_hf_ratio,
        }),
        Err(e) => {
            log::warn!("Skipping {}: {}", record.file_id, e);
            skip(SkipReason::AnalysisFailed(e.to_string()))
        }
    }
}

/// Analyse every adult patient listed in the metadata CSV, with run metadata
///
/// Rows are processed in parallel on the current rayon pool; results keep
/// the metadata order.
///
/// # Errors
///
/// Returns `AnalysisError` only when the metadata CSV itself is unusable.
/// Per-patient problems skip that patient.
pub fn analyze_patients_detailed<P: AsRef<Path>, D: AsRef<Path>>(
    patients_csv: P,
    data_dir: D,
    config: &HrvConfig,
) -> Result<HrvBatch, AnalysisError> {
    let start_time = Instant::now();
    let data_dir = data_dir.as_ref();
    let rows = read_patient_info(patients_csv)?;

    log::info!(
        "Analysing {} patients with RR data from {}",
        rows.len(),
        data_dir.display()
    );

    let outcomes: Vec<PatientOutcome> = rows
        .par_iter()
        .map(|row| analyze_row(row, data_dir, config))
        .collect();

    let mut metadata = BatchMetadata {
        patients_total: rows.len(),
        ..BatchMetadata::default()
    };
    let mut results = Vec::new();
    for outcome in outcomes {
        match outcome {
            PatientOutcome::Analyzed(result) => results.push(result),
            PatientOutcome::Skipped(skipped) => metadata.skipped.push(skipped),
        }
    }
    metadata.patients_analyzed = results.len();
    metadata.processing_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "HRV analysis complete: {}/{} patients analysed in {:.1} ms",
        metadata.patients_analyzed,
        metadata.patients_total,
        metadata.processing_time_ms
    );

    Ok(HrvBatch { results, metadata })
}

/// Analyse every adult patient listed in the metadata CSV
///
/// See [`analyze_patients_detailed`].
pub fn analyze_patients<P: AsRef<Path>, D: AsRef<Path>>(
    patients_csv: P,
    data_dir: D,
    config: &HrvConfig,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    analyze_patients_detailed(patients_csv, data_dir, config).map(|batch| batch.results)
}
