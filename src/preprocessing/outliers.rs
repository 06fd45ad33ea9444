//! Z-score based outlier removal

/// Standard scores using the population standard deviation (ddof = 0)
///
/// A series with zero variance yields all zeros.
pub fn zscores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return vec![];
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if std == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / std).collect()
}

/// Keep items whose key has |z| strictly below `limit`
///
/// Order of the retained items is preserved.
pub fn retain_within_zscore<T, F>(items: Vec<T>, key: F, limit: f64) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let values: Vec<f64> = items.iter().map(&key).collect();
    let scores = zscores(&values);
    let before = items.len();

    let kept: Vec<T> = items
        .into_iter()
        .zip(scores)
        .filter(|(_, z)| z.abs() < limit)
        .map(|(item, _)| item)
        .collect();

    log::debug!(
        "Z-score filter (|z| < {:.1}): kept {}/{} samples",
        limit,
        kept.len(),
        before
    );
    kept
}
