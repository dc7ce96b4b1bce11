//! Formatted dashboard output shared by the text commands and the TUI.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - the printed summary and the TUI cards always agree

use crate::domain::{AggregateTotals, DateRange, MonthlyRecord, RangeResolution, RecentActivity};
use crate::report::RangeView;

pub const TITLE: &str = "Tibbi Təchizat İdarəetmə Sistemi";
pub const SUBTITLE: &str = "Xəstəxana Direktorunun İdarəetmə Paneli";

/// Placeholder for ratios that are undefined over the selection.
pub const NOT_AVAILABLE: &str = "N/A";

/// A titled figure, rendered as a card in the TUI and a line in text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
    pub kind: CardKind,
}

/// Which figure a card shows (the TUI colors cards by kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Purchase,
    Sales,
    Profit,
    Inventory,
}

/// The four headline cards for a selection.
pub fn summary_cards(totals: &AggregateTotals, currency: &str) -> [SummaryCard; 4] {
    [
        SummaryCard {
            title: "Ümumi Alış",
            value: fmt_money(totals.total_purchase, currency),
            caption: "Seçilmiş dövr üzrə".to_string(),
            kind: CardKind::Purchase,
        },
        SummaryCard {
            title: "Ümumi Satış",
            value: fmt_money(totals.total_sales, currency),
            caption: "Seçilmiş dövr üzrə".to_string(),
            kind: CardKind::Sales,
        },
        SummaryCard {
            title: "Xalis Mənfəət",
            value: fmt_money(totals.net_profit, currency),
            caption: format!("Mənfəət marjası: {}", fmt_margin(totals.profit_margin_percent)),
            kind: CardKind::Profit,
        },
        SummaryCard {
            title: "Orta Ehtiyat",
            value: totals
                .average_inventory
                .map(fmt_amount)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            caption: "Məhsul vahidi".to_string(),
            kind: CardKind::Inventory,
        },
    ]
}

/// The three "last month" cards; `N/A` when the selection is empty.
pub fn recent_cards(recent: Option<&RecentActivity>, currency: &str) -> [SummaryCard; 3] {
    let money = |v: Option<i128>| {
        v.map(|v| fmt_money(v, currency))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    let caption = recent.map(|r| r.label.clone()).unwrap_or_default();

    [
        SummaryCard {
            title: "Son ay alış",
            value: money(recent.map(|r| r.purchase_amount.into())),
            caption: caption.clone(),
            kind: CardKind::Purchase,
        },
        SummaryCard {
            title: "Son ay satış",
            value: money(recent.map(|r| r.sales_amount.into())),
            caption: caption.clone(),
            kind: CardKind::Sales,
        },
        SummaryCard {
            title: "Son ay mənfəət",
            value: money(recent.map(|r| r.net_profit.into())),
            caption,
            kind: CardKind::Profit,
        },
    ]
}

/// Short explanation when the range did not resolve exactly.
pub fn range_note(resolution: RangeResolution) -> Option<&'static str> {
    match resolution {
        RangeResolution::Exact => None,
        RangeResolution::FallbackFull => Some("selection not found; showing all months"),
        RangeResolution::Reversed => Some("start is after end; no months selected"),
    }
}

/// Full text summary for `medsupply summary`.
pub fn format_summary(view: &RangeView<'_>, range: &DateRange, total_months: usize, currency: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {TITLE} ===\n"));
    out.push_str(&format!("{SUBTITLE}\n\n"));
    out.push_str(&format!("Range: {} → {}\n", range.start, range.end));
    out.push_str(&format!(
        "Months: {} of {total_months}\n",
        view.filtered.len()
    ));
    if let Some(note) = range_note(view.resolution) {
        out.push_str(&format!("Note: {note}\n"));
    }

    out.push('\n');
    for card in summary_cards(&view.totals, currency) {
        out.push_str(&format_card_line(&card));
    }

    out.push_str("\nSon Fəaliyyət:\n");
    let recent = view.recent_activity();
    for card in recent_cards(recent.as_ref(), currency) {
        out.push_str(&format_card_line(&card));
    }

    out
}

fn format_card_line(card: &SummaryCard) -> String {
    if card.caption.is_empty() {
        format!("  {:<16} {:>16}\n", card.title, card.value)
    } else {
        format!("  {:<16} {:>16}  ({})\n", card.title, card.value, card.caption)
    }
}

/// Amount with thousands separators, e.g. `-12,345`.
pub fn fmt_amount(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Amount followed by the currency code, e.g. `45,120 AZN`.
pub fn fmt_money(value: impl Into<i128>, currency: &str) -> String {
    format!("{} {currency}", fmt_amount(value))
}

/// One month's figures for the chart cursor.
pub fn month_tooltip(record: &MonthlyRecord, currency: &str) -> String {
    format!(
        "Ay: {} | Alış: {} | Satış: {}",
        record.label,
        fmt_money(record.purchase_amount, currency),
        fmt_money(record.sales_amount, currency)
    )
}

/// Margin with one decimal, e.g. `-25.0%`.
pub fn fmt_margin(margin: Option<f64>) -> String {
    match margin {
        Some(m) if m.is_finite() => format!("{m:.1}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Axis tick for amounts, e.g. `45k`.
pub fn fmt_thousands(value: f64) -> String {
    format!("{:.0}k", value / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate;

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(fmt_amount(0), "0");
        assert_eq!(fmt_amount(999), "999");
        assert_eq!(fmt_amount(1000), "1,000");
        assert_eq!(fmt_amount(1234567), "1,234,567");
        assert_eq!(fmt_amount(-150), "-150");
        assert_eq!(fmt_amount(-45120), "-45,120");
        assert_eq!(fmt_money(45120, "AZN"), "45,120 AZN");
        assert_eq!(fmt_amount(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn margins_have_one_decimal() {
        assert_eq!(fmt_margin(Some(-25.0)), "-25.0%");
        assert_eq!(fmt_margin(Some(12.345)), "12.3%");
        assert_eq!(fmt_margin(None), "N/A");
        assert_eq!(fmt_margin(Some(f64::NAN)), "N/A");
        assert_eq!(fmt_thousands(45_600.0), "46k");
    }

    #[test]
    fn empty_selection_renders_not_available() {
        let totals = crate::report::compute_totals(&[]);
        let cards = summary_cards(&totals, "AZN");
        assert_eq!(cards[0].value, "0 AZN");
        assert_eq!(cards[2].caption, "Mənfəət marjası: N/A");
        assert_eq!(cards[3].value, "N/A");

        let recent = recent_cards(None, "AZN");
        assert!(recent.iter().all(|c| c.value == "N/A"));
    }

    #[test]
    fn summary_mentions_fallback() {
        let records = vec![MonthlyRecord {
            label: "Mart 2022".to_string(),
            short_label: "Mart".to_string(),
            year: 2022,
            month: 3,
            purchase_amount: 20_000,
            sales_amount: 25_000,
            inventory_level: 800,
            supplier_count: 9,
        }];
        let range = DateRange::new("Yanvar 2030", "Mart 2022");
        let view = aggregate(&records, &range);
        let text = format_summary(&view, &range, records.len(), "AZN");

        assert!(text.contains("Months: 1 of 1"));
        assert!(text.contains("selection not found"));
        assert!(text.contains("25.0%"));
        assert!(text.contains("5,000 AZN"));
        assert!(text.contains("800"));
    }

    #[test]
    fn tooltip_lists_both_series() {
        let record = MonthlyRecord {
            label: "Mart 2023".to_string(),
            short_label: "Mart".to_string(),
            year: 2023,
            month: 3,
            purchase_amount: 45_120,
            sales_amount: 38_000,
            inventory_level: 700,
            supplier_count: 6,
        };
        assert_eq!(
            month_tooltip(&record, "AZN"),
            "Ay: Mart 2023 | Alış: 45,120 AZN | Satış: 38,000 AZN"
        );
    }
}
