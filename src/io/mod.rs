//! Input/output helpers.
//!
//! - dataset JSON read/write + validation (`dataset`)
//! - per-month CSV exports (`export`)

pub mod dataset;
pub mod export;

pub use dataset::*;
pub use export::*;
