//! Markdown snapshot of the current dashboard view.
//!
//! Written from the TUI (`d`) so an administrator can keep a copy of what was
//! on screen: the range, the headline figures, and a per-month table.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::session::DashboardSession;
use crate::error::AppError;
use crate::report::{fmt_amount, recent_cards, summary_cards};

/// Write a snapshot under `dir` and return its path.
pub fn write_snapshot_bundle(dir: &Path, session: &DashboardSession, currency: &str) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::runtime(format!("Failed to create snapshot dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let seed = session
        .seed()
        .map(|s| format!("seed{s}"))
        .unwrap_or_else(|| "dataset".to_string());
    let path = dir.join(format!("medsupply_{seed}_{ts}.md"));

    let body = render_snapshot(session, currency, &Local::now().to_rfc3339());
    std::fs::write(&path, body)
        .map_err(|e| AppError::runtime(format!("Failed to write snapshot '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), "wrote snapshot");
    Ok(path)
}

fn render_snapshot(session: &DashboardSession, currency: &str, generated: &str) -> String {
    let view = session.view();
    let range = session.range();
    let mut out = String::new();

    out.push_str(&format!("# {}\n", crate::report::TITLE));
    out.push_str(&format!("- generated: {generated}\n"));
    match session.seed() {
        Some(seed) => out.push_str(&format!("- seed: {seed}\n")),
        None => out.push_str("- seed: -\n"),
    }
    out.push_str(&format!("- range: {} → {}\n", range.start, range.end));
    out.push_str(&format!(
        "- months: {} of {}\n",
        view.filtered.len(),
        session.records().len()
    ));
    if let Some(note) = crate::report::range_note(view.resolution) {
        out.push_str(&format!("- note: {note}\n"));
    }

    out.push_str("\n## Totals\n");
    out.push_str("| figure | value | detail |\n");
    out.push_str("| - | - | - |\n");
    let recent = view.recent_activity();
    let headline = summary_cards(&view.totals, currency);
    let last_month = recent_cards(recent.as_ref(), currency);
    for card in headline.iter().chain(last_month.iter()) {
        out.push_str(&format!("| {} | {} | {} |\n", card.title, card.value, card.caption));
    }

    out.push_str("\n## Months\n");
    out.push_str("| month | purchase | sales | profit | inventory | suppliers |\n");
    out.push_str("| - | - | - | - | - | - |\n");
    for r in view.filtered {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            r.label,
            fmt_amount(r.purchase_amount),
            fmt_amount(r.sales_amount),
            fmt_amount(r.net_profit()),
            fmt_amount(r.inventory_level),
            r.supplier_count
        ));
    }

    out
}
