//! Dominant gyroscope axis selection

use crate::io::sensor::SensorSample;
use serde::{Deserialize, Serialize};

/// Gyroscope axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Rotation around x
    X,
    /// Rotation around y
    Y,
    /// Rotation around z
    Z,
}

impl Axis {
    /// All axes in column order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Value of this axis in a sample
    pub fn value(&self, sample: &SensorSample) -> f64 {
        match self {
            Axis::X => sample.wx,
            Axis::Y => sample.wy,
            Axis::Z => sample.wz,
        }
    }

    /// Extract this axis from a window of samples
    pub fn extract(&self, window: &[SensorSample]) -> Vec<f64> {
        window.iter().map(|s| self.value(s)).collect()
    }
}

/// Axis with the largest mean absolute value in the window
///
/// Ties resolve to the earlier axis (x before y before z). An empty window
/// returns `Axis::X`.
pub fn most_sensitive_axis(window: &[SensorSample]) -> Axis {
    if window.is_empty() {
        return Axis::X;
    }

    let n = window.len() as f64;
    let mut best = Axis::X;
    let mut best_mean = f64::NEG_INFINITY;
    for axis in Axis::ALL {
        let mean_abs = window.iter().map(|s| axis.value(s).abs()).sum::<f64>() / n;
        if mean_abs > best_mean {
            best_mean = mean_abs;
            best = axis;
        }
    }
    best
}
