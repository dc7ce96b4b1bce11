//! Read/write dataset JSON files.
//!
//! A dataset file is the "portable" form of a session's records: it lets a
//! report be regenerated later with exactly the same figures, independent of
//! the random generator.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::calendar::short_label;
use crate::domain::{MAX_MONTHLY_AMOUNT, MonthlyRecord};
use crate::error::AppError;

const TOOL_NAME: &str = "medsupply";

/// On-disk dataset schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub tool: String,
    /// Generator seed, when the records were generated rather than loaded.
    #[serde(default)]
    pub seed: Option<u64>,
    pub records: Vec<MonthlyRecord>,
}

/// Write records to a dataset JSON file.
pub fn write_dataset_json(path: &Path, records: &[MonthlyRecord], seed: Option<u64>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create dataset JSON '{}': {e}", path.display())))?;

    let dataset = DatasetFile {
        tool: TOOL_NAME.to_string(),
        seed,
        records: records.to_vec(),
    };

    serde_json::to_writer_pretty(file, &dataset)
        .map_err(|e| AppError::usage(format!("Failed to write dataset JSON: {e}")))?;

    tracing::info!(path = %path.display(), records = records.len(), "wrote dataset");
    Ok(())
}

/// Read and validate a dataset JSON file.
pub fn read_dataset_json(path: &Path) -> Result<DatasetFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open dataset JSON '{}': {e}", path.display())))?;
    let dataset: DatasetFile =
        serde_json::from_reader(file).map_err(|e| AppError::usage(format!("Invalid dataset JSON: {e}")))?;

    validate_records(&dataset.records)?;
    tracing::info!(path = %path.display(), records = dataset.records.len(), "loaded dataset");
    Ok(dataset)
}

/// Check the invariants range selection relies on:
/// non-empty, unique labels, strictly chronological months, and amounts no
/// larger than `MAX_MONTHLY_AMOUNT`.
pub fn validate_records(records: &[MonthlyRecord]) -> Result<(), AppError> {
    if records.is_empty() {
        return Err(AppError::usage("Dataset contains no records."));
    }

    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !(1..=12).contains(&r.month) {
            return Err(AppError::usage(format!(
                "Record '{}' has invalid month number {}.",
                r.label, r.month
            )));
        }
        if r.short_label != short_label(&r.label) {
            return Err(AppError::usage(format!(
                "Record '{}' has short label '{}' (expected '{}').",
                r.label,
                r.short_label,
                short_label(&r.label)
            )));
        }
        if r.purchase_amount > MAX_MONTHLY_AMOUNT || r.sales_amount > MAX_MONTHLY_AMOUNT {
            return Err(AppError::usage(format!(
                "Record '{}' has an amount above the {MAX_MONTHLY_AMOUNT} limit.",
                r.label
            )));
        }
        if !seen.insert(r.label.as_str()) {
            return Err(AppError::usage(format!("Duplicate month label '{}'.", r.label)));
        }
    }

    if let Some(w) = records
        .windows(2)
        .find(|w| w[0].year_month() >= w[1].year_month())
    {
        return Err(AppError::usage(format!(
            "Records out of calendar order: '{}' ({}) precedes '{}' ({}).",
            w[0].label,
            w[0].year_month(),
            w[1].label,
            w[1].year_month()
        )));
    }

    Ok(())
}
