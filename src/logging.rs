//! Tracing subscriber setup.
//!
//! Text commands log to stderr. The TUI owns the terminal, so it only logs when
//! a log file is configured.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "medsupply=info";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

impl<'a> LogTarget<'a> {
    /// Resolve the target for a front-end: an explicit file always wins.
    pub fn for_mode(log_file: Option<&'a Path>, interactive: bool) -> Self {
        match (log_file, interactive) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Off,
            (None, false) => Self::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(target: LogTarget<'_>) -> Result<(), AppError> {
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::usage(format!("Failed to open log file '{}': {e}", path.display())))?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_mode_logs_only_to_files() {
        let path = Path::new("dash.log");
        assert_eq!(LogTarget::for_mode(None, true), LogTarget::Off);
        assert_eq!(LogTarget::for_mode(None, false), LogTarget::Stderr);
        assert_eq!(LogTarget::for_mode(Some(path), true), LogTarget::File(path));
    }
}
