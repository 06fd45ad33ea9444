//! Data loading and result writing
//!
//! CSV and text readers for patient metadata, RR intervals, gyroscope samples
//! and exercise tests, plus CSV writers for results.

pub mod measurements;
pub mod patient_info;
pub mod results;
pub mod rr_file;
pub mod sensor;
