//! `medsupply` library crate.
//!
//! The binary (`medsupply`) is a thin wrapper around this library so that:
//!
//! - the range filter and aggregation are testable without spawning processes
//! - the text commands and the TUI share one session/aggregation path

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod snapshot;
pub mod tui;
