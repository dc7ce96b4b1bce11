//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - calendar helpers (`YearMonth`, `MonthSpan`)
//! - the monthly data points (`MonthlyRecord`)
//! - range selection and derived outputs (`DateRange`, `AggregateTotals`, etc.)

pub mod types;

pub use types::*;
