//! Gyroscope step counting
//!
//! - Dominant axis selection
//! - Magnitude spectrum
//! - Polynomial peak refinement
//! - Sliding-window counter

pub mod axis;
pub mod counter;
pub mod polynomial;
pub mod spectrum;

pub use counter::count_steps;
