//! Data sources for the dashboard: month labels and the synthetic generator.

pub mod calendar;
pub mod sample;

pub use sample::{SampleData, generate_records, generate_sample, generate_seeded};
