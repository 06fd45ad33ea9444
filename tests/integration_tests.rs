//! Integration tests for the analysis pipelines

use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wc_dsp::analysis::metadata::SkipReason;
use wc_dsp::io::measurements::{read_measurements, read_subjects};
use wc_dsp::io::results::write_results;
use wc_dsp::io::sensor::read_sensor_csv;
use wc_dsp::{
    analyze_patients, analyze_patients_detailed, count_steps, estimate_energy_expenditure,
    AnalysisResult, EnergyConfig, Gender, HrvConfig, StepConfig,
};

/// RR series breathing at `resp_hz` with a 0.1 Hz LF component
fn synthetic_rr(beats: usize, resp_hz: f64) -> Vec<f64> {
    let mut rr = Vec::with_capacity(beats);
    let mut t = 0.0;
    for _ in 0..beats {
        let interval =
            900.0 + 25.0 * (2.0 * PI * 0.1 * t).sin() + 40.0 * (2.0 * PI * resp_hz * t).sin();
        rr.push(interval);
        t += interval / 1000.0;
    }
    rr
}

fn write_rr(dir: &Path, id: &str, rr: &[f64]) {
    let text: String = rr.iter().map(|v| format!("{:.3}\n", v)).collect();
    fs::write(dir.join(format!("{}.txt", id)), text).unwrap();
}

fn hrv_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("patient-info.csv"),
        "File,Age (years),Gender,Comment\n\
         ID1,34,M,ok\n\
         ID2,0.25,F,infant\n\
         ID3,61,F,no recording\n\
         ID4,45,,ok\n\
         ID5,abc,M,bad age\n\
         ID6,29,F,too short\n",
    )
    .unwrap();

    write_rr(dir.path(), "ID1", &synthetic_rr(300, 0.25));
    write_rr(dir.path(), "ID2", &synthetic_rr(300, 0.5));
    write_rr(dir.path(), "ID4", &synthetic_rr(300, 0.3));
    write_rr(dir.path(), "ID6", &[850.0]);
    dir
}

#[test]
fn test_hrv_batch_skips_and_orders() {
    let dir = hrv_fixture();
    let batch = analyze_patients_detailed(
        dir.path().join("patient-info.csv"),
        dir.path(),
        &HrvConfig::default(),
    )
    .expect("batch should succeed");

    let ids: Vec<&str> = batch.results.iter().map(|r| r.file_id.as_str()).collect();
    assert_eq!(ids, vec!["ID1", "ID4"]);

    assert_eq!(batch.metadata.patients_total, 6);
    assert_eq!(batch.metadata.patients_analyzed, 2);
    assert_eq!(batch.metadata.skipped.len(), 4);

    let reasons: Vec<(&str, &SkipReason)> = batch
        .metadata
        .skipped
        .iter()
        .map(|s| (s.file_id.as_str(), &s.reason))
        .collect();
    assert!(matches!(reasons[0], ("ID2", SkipReason::InvalidAge(_))));
    assert!(matches!(reasons[1], ("ID3", SkipReason::MissingRrFile(_))));
    assert!(matches!(reasons[2], ("ID5", SkipReason::InvalidAge(_))));
    assert!(matches!(reasons[3], ("ID6", SkipReason::AnalysisFailed(_))));
}

#[test]
fn test_hrv_metrics_from_files() {
    let dir = hrv_fixture();
    let results = analyze_patients(
        dir.path().join("patient-info.csv"),
        dir.path(),
        &HrvConfig::default(),
    )
    .unwrap();

    let id1 = &results[0];
    assert_eq!(id1.gender, Gender::Male);
    assert_eq!(id1.age, 34.0);
    assert!(id1.rmssd > 0.0);
    assert!(
        (id1.respiration_rate_bpm - 15.0).abs() < 1.0,
        "ID1 respiration {:.2}",
        id1.respiration_rate_bpm
    );
    assert!(id1.lf_hf_ratio.is_finite() && id1.lf_hf_ratio > 0.0);

    let id4 = &results[1];
    assert_eq!(id4.gender, Gender::NotAvailable);
    assert!(
        (id4.respiration_rate_bpm - 18.0).abs() < 1.0,
        "ID4 respiration {:.2}",
        id4.respiration_rate_bpm
    );
}

#[test]
fn test_hrv_results_csv() {
    let dir = hrv_fixture();
    let results = analyze_patients(
        dir.path().join("patient-info.csv"),
        dir.path(),
        &HrvConfig::default(),
    )
    .unwrap();

    let output = dir.path().join("analysis_results.csv");
    write_results(&output, &results).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["File", "Age (years)", "Gender", "RMSSD (ms)", "Resp Rate (bpm)", "LF/HF Ratio"]
    );

    let rows: Vec<AnalysisResult> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].file_id, "ID1");
    assert_eq!(rows[1].gender, Gender::NotAvailable);
    assert!((rows[0].rmssd - results[0].rmssd).abs() < 1e-9);
}

#[test]
fn test_hrv_batch_survives_corrupt_rows() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("patient-info.csv"),
        "File,Age (years),Gender\n\
         ID1,34,M\n\
         ,40,F\n\
         ID7,52,M\n",
    )
    .unwrap();
    write_rr(dir.path(), "ID1", &synthetic_rr(300, 0.25));
    fs::write(dir.path().join("ID7.txt"), "800\n810\ninf\n805\n").unwrap();

    let batch = analyze_patients_detailed(
        dir.path().join("patient-info.csv"),
        dir.path(),
        &HrvConfig::default(),
    )
    .expect("batch should complete");

    assert_eq!(batch.results.len(), 1);
    assert_eq!(batch.results[0].file_id, "ID1");
    assert_eq!(batch.metadata.skipped.len(), 2);
    assert!(matches!(batch.metadata.skipped[0].reason, SkipReason::InvalidRow(_)));
    assert_eq!(batch.metadata.skipped[1].file_id, "ID7");
    assert!(matches!(batch.metadata.skipped[1].reason, SkipReason::AnalysisFailed(_)));
}

#[test]
fn test_hrv_missing_header_column_aborts() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("patient-info.csv");
    fs::write(&csv_path, "Patient,Gender\nID1,M\n").unwrap();

    assert!(analyze_patients(&csv_path, dir.path(), &HrvConfig::default()).is_err());
}

#[test]
fn test_step_count_from_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gyro.csv");

    let fs_hz = 100.0;
    let mut text = String::from("time,wx,wy,wz\n");
    // 20 s rest, 40 s walking at 0.8 Hz on the x axis
    for i in 0..6000 {
        let t = i as f64 / fs_hz;
        let wx = if t >= 20.0 { 80.0 * (2.0 * PI * 0.8 * t).sin() } else { 0.0 };
        text.push_str(&format!("{:.2},{:.5},{:.5},{:.5}\n", t, wx, 0.01, -0.01));
    }
    fs::write(&path, text).unwrap();

    let samples = read_sensor_csv(&path).unwrap();
    assert_eq!(samples.len(), 6000);

    let result = count_steps(&samples, &StepConfig::default()).unwrap();
    assert!(result.total_steps > 0.0);

    // Windows entirely inside the rest period contribute nothing
    for window in result.windows.iter().filter(|w| w.start_index + 512 <= 2000) {
        assert!(!window.is_walking(), "rest window at {}", window.start_index);
    }

    // Roughly 40 s * 0.8 Hz of gait cycles
    assert!(
        result.total_steps > 20.0 && result.total_steps < 45.0,
        "total steps {:.2}",
        result.total_steps
    );
}

#[test]
fn test_energy_pipeline_from_csv() {
    let dir = TempDir::new().unwrap();
    let measurements_path = dir.path().join("test_measure.csv");
    let subjects_path = dir.path().join("subject-info.csv");

    let mut measurements = String::from("time,Speed,HR,VO2,VCO2,RR,VE,ID,ID_test\n");
    for i in 0..20 {
        let hr = 90.0 + i as f64;
        let vo2 = 1000.0 + 50.0 * i as f64;
        measurements.push_str(&format!(
            "{},5.0,{},{},{},0.5,30.0,1,1_1\n",
            i,
            hr,
            vo2,
            vo2 * 0.9
        ));
    }
    // Missing HR is dropped
    measurements.push_str("20,5.0,,2000,1800,0.5,30.0,1,1_1\n");
    // Missing RR and VE are dropped too, even though neither is used
    measurements.push_str("21,5.0,110,2500,2200,,,1,1_1\n");
    // No matching subject
    measurements.push_str("0,5.0,100,1000,900,0.5,30.0,9,9_1\n");
    fs::write(&measurements_path, measurements).unwrap();

    fs::write(
        &subjects_path,
        "Age,Weight,Height,Humidity,Temperature,Sex,ID,ID_test\n35,70,178,40,21,0,1,1_1\n",
    )
    .unwrap();

    let m = read_measurements(&measurements_path).unwrap();
    let s = read_subjects(&subjects_path).unwrap();
    let estimates = estimate_energy_expenditure(&m, &s, &EnergyConfig::default());

    assert_eq!(estimates.len(), 20);
    // Highest VO2 among complete rows is 1950 ml/min
    assert!((estimates[0].vo2_max - 1950.0 / 70.0).abs() < 1e-9);
    assert!(estimates.iter().all(|e| e.sex == 1.0));
    assert!(estimates.iter().all(|e| e.ee_weir > 0.0));
    // Energy expenditure rises with heart rate
    assert!(estimates[19].ee_keytel > estimates[0].ee_keytel);
}
