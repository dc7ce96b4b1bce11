//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - builds the dashboard session (generated or loaded records)
//! - prints summaries/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DashArgs, PlotArgs};
use crate::app::session::DashboardSession;
use crate::domain::{DashboardConfig, DateRange, MonthSpan, MonthlyRecord};
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod pipeline;
pub mod session;

/// Entry point for the `medsupply` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // We want `medsupply` and `medsupply -s "Mart 2023"` to behave like
    // `medsupply tui ...`. Clap requires a subcommand name, so we rewrite argv
    // before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Months(args) => handle_months(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_summary(args: DashArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::for_mode(args.log_file.as_deref(), false))?;
    let config = dashboard_config_from_args(&args);
    let session = pipeline::build_session(&config)?;
    let view = session.view();

    println!(
        "{}",
        crate::report::format_summary(&view, session.range(), session.records().len(), &config.currency)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(view.filtered, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    pipeline::write_exports(&session, &config)
}

fn handle_months(args: DashArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::for_mode(args.log_file.as_deref(), false))?;
    let config = dashboard_config_from_args(&args);
    let session = pipeline::build_session(&config)?;

    for line in month_lines(&session) {
        println!("{line}");
    }
    Ok(())
}

/// Numbered selector labels, one per month.
fn month_lines(session: &DashboardSession) -> Vec<String> {
    session
        .available_labels()
        .enumerate()
        .map(|(idx, label)| format!("{:>3}) {label}", idx + 1))
        .collect()
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    println!("{}", render_dataset_plot(&args)?);
    Ok(())
}

fn render_dataset_plot(args: &PlotArgs) -> Result<String, AppError> {
    let dataset = crate::io::read_dataset_json(&args.dataset)?;
    let range = plot_range(&dataset.records, args)?;
    let view = crate::report::aggregate(&dataset.records, &range);
    Ok(crate::plot::render_ascii_plot(view.filtered, args.width, args.height))
}

/// Missing bounds default to the dataset's own first/last month.
fn plot_range(records: &[MonthlyRecord], args: &PlotArgs) -> Result<DateRange, AppError> {
    let full = DateRange::full(records).ok_or_else(|| AppError::usage("Dataset contains no records."))?;
    Ok(DateRange::new(
        args.start.clone().unwrap_or(full.start),
        args.end.clone().unwrap_or(full.end),
    ))
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::for_mode(args.log_file.as_deref(), true))?;
    let config = dashboard_config_from_args(&args);
    let session = pipeline::build_session(&config)?;
    crate::tui::run(session, config.currency)
}

pub fn dashboard_config_from_args(args: &DashArgs) -> DashboardConfig {
    DashboardConfig {
        span: MonthSpan {
            first: args.from,
            count: args.months,
        },
        seed: args.seed,
        dataset: args.dataset.clone(),
        range: DateRange::new(args.start.clone(), args.end.clone()),
        currency: args.currency.clone(),
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_dataset: args.export_dataset.clone(),
    }
}

/// Rewrite argv so `medsupply` defaults to `medsupply tui`.
///
/// Rules:
/// - `medsupply`                      -> `medsupply tui`
/// - `medsupply -s "Mart 2023" ...`   -> `medsupply tui -s "Mart 2023" ...`
/// - `medsupply --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "months" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["medsupply"])), argv(&["medsupply", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["medsupply", "-s", "Mart 2023"])),
            argv(&["medsupply", "tui", "-s", "Mart 2023"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["medsupply", "summary", "--seed", "1"])),
            argv(&["medsupply", "summary", "--seed", "1"])
        );
        assert_eq!(rewrite_args(argv(&["medsupply", "--help"])), argv(&["medsupply", "--help"]));
    }

    #[test]
    fn args_map_into_config() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "medsupply",
            "summary",
            "--seed",
            "12",
            "--from",
            "2023-03",
            "--months",
            "6",
            "-s",
            "Aprel 2023",
            "-e",
            "Iyun 2023",
            "--no-plot",
        ]));
        let Command::Summary(args) = cli.command else {
            panic!("expected summary command");
        };
        let config = dashboard_config_from_args(&args);

        assert_eq!(config.seed, Some(12));
        assert_eq!(config.span.first.to_string(), "2023-03");
        assert_eq!(config.span.count, 6);
        assert_eq!(config.range, DateRange::new("Aprel 2023", "Iyun 2023"));
        assert!(!config.plot);
        assert_eq!(config.currency, "AZN");
    }

    fn plot_args(extra: &[&str]) -> PlotArgs {
        let mut all = vec!["medsupply", "plot"];
        all.extend_from_slice(extra);
        match crate::cli::Cli::parse_from(argv(&all)).command {
            Command::Plot(args) => args,
            _ => panic!("expected plot command"),
        }
    }

    fn five_months() -> Vec<MonthlyRecord> {
        let span = MonthSpan {
            first: crate::domain::YearMonth::new(2023, 3).unwrap(),
            count: 5,
        };
        crate::data::generate_seeded(&span, 4).unwrap().records
    }

    #[test]
    fn plot_range_defaults_to_dataset_ends() {
        let records = five_months();

        let args = plot_args(&["--dataset", "unused.json"]);
        assert_eq!(plot_range(&records, &args).unwrap(), DateRange::new("Mart 2023", "İyul 2023"));

        let args = plot_args(&["--dataset", "unused.json", "-s", "Aprel 2023"]);
        assert_eq!(plot_range(&records, &args).unwrap(), DateRange::new("Aprel 2023", "İyul 2023"));

        let args = plot_args(&["--dataset", "unused.json", "-e", "May 2023"]);
        assert_eq!(plot_range(&records, &args).unwrap(), DateRange::new("Mart 2023", "May 2023"));

        assert_eq!(plot_range(&[], &args).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn dataset_plot_covers_every_month_by_default() {
        let records = five_months();
        let path = std::env::temp_dir().join(format!("medsupply_{}_plot.json", std::process::id()));
        crate::io::write_dataset_json(&path, &records, Some(4)).unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let full = render_dataset_plot(&plot_args(&["--dataset", &path_arg, "--width", "30", "--height", "8"]));
        let expected = crate::plot::render_ascii_plot(&records, 30, 8);
        let _ = std::fs::remove_file(&path);

        let full = full.unwrap();
        assert_eq!(full, expected);
        assert!(full.starts_with("Plot: months=[Mart 2023 .. İyul 2023] (5)"), "{full}");
    }

    #[test]
    fn months_are_numbered_in_order() {
        let session = DashboardSession::new(five_months(), DateRange::default(), Some(4));
        let lines = month_lines(&session);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  1) Mart 2023");
        assert_eq!(lines[4], "  5) İyul 2023");
    }
}
