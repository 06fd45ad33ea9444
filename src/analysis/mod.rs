//! Analysis result and run metadata modules
//!
//! - Result types for the HRV, step and energy pipelines
//! - Batch metadata (skipped rows, timing)

pub mod metadata;
pub mod result;
