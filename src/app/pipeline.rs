//! Shared session setup used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load or generate records -> build session -> (optional) exports
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::app::session::DashboardSession;
use crate::data::generate_sample;
use crate::domain::DashboardConfig;
use crate::error::AppError;

/// Create the session for one dashboard run.
///
/// Records come from `config.dataset` when set, otherwise from the generator.
/// Either way they are produced exactly once here.
pub fn build_session(config: &DashboardConfig) -> Result<DashboardSession, AppError> {
    let (records, seed) = match &config.dataset {
        Some(path) => {
            let dataset = crate::io::read_dataset_json(path)?;
            (dataset.records, dataset.seed)
        }
        None => {
            let sample = generate_sample(&config.span, config.seed)?;
            (sample.records, Some(sample.seed))
        }
    };

    Ok(DashboardSession::new(records, config.range.clone(), seed))
}

/// Write the exports requested in `config`.
pub fn write_exports(session: &DashboardSession, config: &DashboardConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_csv {
        crate::io::write_records_csv(path, session.view().filtered)?;
    }
    if let Some(path) = &config.export_dataset {
        crate::io::write_dataset_json(path, session.records(), session.seed())?;
    }
    Ok(())
}
