//! Command-line parsing for the supply dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation code. Most flags can also be set through
//! environment variables (or a `.env` file, loaded before parsing).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_CURRENCY, DEFAULT_MONTH_COUNT, DEFAULT_RANGE_END, DEFAULT_RANGE_START, YearMonth};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "medsupply", version, about = "Medical supply purchase/sales dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print summary cards, recent activity and a chart for the selected range.
    Summary(DashArgs),
    /// List the selectable month labels in calendar order.
    Months(DashArgs),
    /// Plot a previously exported dataset.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// Same session setup as `medsupply summary`, rendered with Ratatui.
    Tui(DashArgs),
}

/// Common options for building a dashboard session.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// First month of the selected range (a month label, e.g. "İyun 2022").
    #[arg(short = 's', long, env = "MEDSUPPLY_START", default_value = DEFAULT_RANGE_START)]
    pub start: String,

    /// Last month of the selected range (a month label, e.g. "Oktyabr 2024").
    #[arg(short = 'e', long, env = "MEDSUPPLY_END", default_value = DEFAULT_RANGE_END)]
    pub end: String,

    /// Random seed for the generated figures (random when omitted).
    #[arg(long, env = "MEDSUPPLY_SEED")]
    pub seed: Option<u64>,

    /// First generated month (YYYY-MM).
    #[arg(long, value_name = "YYYY-MM", value_parser = YearMonth::parse, default_value = "2022-01")]
    pub from: YearMonth,

    /// Number of consecutive months to generate.
    #[arg(long, default_value_t = DEFAULT_MONTH_COUNT)]
    pub months: usize,

    /// Load records from a dataset JSON instead of generating them.
    #[arg(long, value_name = "JSON", env = "MEDSUPPLY_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Currency code appended to amounts.
    #[arg(long, env = "MEDSUPPLY_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the selected months to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full dataset (all months + seed) to JSON.
    #[arg(long = "export-dataset")]
    pub export_dataset: Option<PathBuf>,

    /// Write logs to this file (the TUI logs nowhere else).
    #[arg(long, env = "MEDSUPPLY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Options for plotting a saved dataset.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Dataset JSON produced by `medsupply summary --export-dataset`.
    #[arg(long, value_name = "JSON")]
    pub dataset: PathBuf,

    /// First month of the plotted range.
    #[arg(short = 's', long)]
    pub start: Option<String>,

    /// Last month of the plotted range.
    #[arg(short = 'e', long)]
    pub end: Option<String>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
