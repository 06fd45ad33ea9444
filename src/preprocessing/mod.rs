//! Signal preprocessing modules
//!
//! This module contains utilities for preparing raw sensor data for analysis:
//! - Tachogram resampling (linear, cubic spline)
//! - Window functions
//! - Z-score outlier removal

pub mod interpolation;
pub mod outliers;
pub mod window;
