//! Energy expenditure from exercise tests
//!
//! Joins per-sample measurements with subject information, drops heart-rate
//! outliers and computes gas-exchange (Weir) and heart-rate (Keytel)
//! estimates for every remaining sample.

pub mod equations;

use crate::analysis::result::EnergyEstimate;
use crate::config::EnergyConfig;
use crate::io::measurements::{Measurement, Subject};
use crate::preprocessing::outliers::retain_within_zscore;
use std::collections::HashMap;

use equations::{keytel_ee, weir_ee};

/// A measurement joined with its subject, with no missing values
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSample {
    /// Exercise test identifier
    pub id_test: String,
    /// Heart rate in beats per minute
    pub hr: f64,
    /// Oxygen uptake in ml/min
    pub vo2: f64,
    /// Carbon dioxide output in ml/min
    pub vco2: f64,
    /// 1 = male, 0 = female
    pub sex: f64,
    /// Age in years
    pub age: f64,
    /// Body weight in kg
    pub weight: f64,
}

/// Recorded sex uses 0 = male; the Keytel equation expects 1 = male
fn flip_sex(sex: f64) -> f64 {
    if sex == 0.0 {
        1.0
    } else if sex == 1.0 {
        0.0
    } else {
        sex
    }
}

/// Left-join measurements with subjects on `ID_test`
///
/// Each matching subject row yields one sample. Measurements without a
/// subject are dropped, as are incomplete measurement rows (an empty cell in
/// any source column) and subjects missing sex, age or weight. Output keeps
/// measurement order.
pub fn merge_measurements(measurements: &[Measurement], subjects: &[Subject]) -> Vec<MergedSample> {
    let mut by_test: HashMap<&str, Vec<&Subject>> = HashMap::new();
    for subject in subjects {
        by_test.entry(subject.id_test.as_str()).or_default().push(subject);
    }

    let mut merged = Vec::new();
    for m in measurements.iter().filter(|m| m.complete) {
        let Some(matches) = by_test.get(m.id_test.as_str()) else {
            continue;
        };
        for s in matches {
            if let (Some(hr), Some(vo2), Some(vco2), Some(sex), Some(age), Some(weight)) =
                (m.hr, m.vo2, m.vco2, s.sex, s.age, s.weight)
            {
                merged.push(MergedSample {
                    id_test: m.id_test.clone(),
                    hr,
                    vo2,
                    vco2,
                    sex: flip_sex(sex),
                    age,
                    weight,
                });
            }
        }
    }

    log::debug!(
        "Merged {} measurements with {} subjects into {} complete samples",
        measurements.len(),
        subjects.len(),
        merged.len()
    );
    merged
}

/// Estimate energy expenditure for every complete, non-outlier sample
///
/// VO2max per test is the test's highest VO2 divided by body weight.
pub fn estimate_energy_expenditure(
    measurements: &[Measurement],
    subjects: &[Subject],
    config: &EnergyConfig,
) -> Vec<EnergyEstimate> {
    let merged = merge_measurements(measurements, subjects);
    if merged.is_empty() {
        log::warn!("No complete measurement rows to analyse");
        return vec![];
    }

    let samples = retain_within_zscore(merged, |s| s.hr, config.hr_zscore_limit);

    let mut max_vo2: HashMap<&str, f64> = HashMap::new();
    for s in &samples {
        let entry = max_vo2.entry(s.id_test.as_str()).or_insert(f64::NEG_INFINITY);
        *entry = entry.max(s.vo2);
    }

    let estimates: Vec<EnergyEstimate> = samples
        .iter()
        .map(|s| {
            let vo2_max = max_vo2.get(s.id_test.as_str()).copied().unwrap_or(s.vo2) / s.weight;
            EnergyEstimate {
                id_test: s.id_test.clone(),
                hr: s.hr,
                sex: s.sex,
                age: s.age,
                weight: s.weight,
                vo2_max,
                ee_weir: weir_ee(s.vo2, s.vco2),
                ee_keytel: keytel_ee(s.sex, s.age, s.weight, vo2_max, s.hr),
            }
        })
        .collect();

    log::info!(
        "Estimated energy expenditure for {} samples across {} tests",
        estimates.len(),
        max_vo2.len()
    );
    estimates
}
