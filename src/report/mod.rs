//! Range filtering and aggregation.
//!
//! Everything here is a pure function of `(records, range)`: no hidden state,
//! so re-deriving a view on every redraw is always consistent.

pub mod format;

pub use format::*;

use crate::domain::{AggregateTotals, DateRange, MonthlyRecord, RangeResolution, RecentActivity, clamp_i64};

/// The selected slice of records together with its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeView<'a> {
    pub filtered: &'a [MonthlyRecord],
    pub totals: AggregateTotals,
    pub resolution: RangeResolution,
}

impl<'a> RangeView<'a> {
    /// Last month of the selection, if any.
    pub fn recent_activity(&self) -> Option<RecentActivity> {
        recent_activity(self.filtered)
    }
}

/// Resolve `range` against `records` and aggregate the selected slice.
pub fn aggregate<'a>(records: &'a [MonthlyRecord], range: &DateRange) -> RangeView<'a> {
    let (filtered, resolution) = resolve_range(records, range);
    RangeView {
        filtered,
        totals: compute_totals(filtered),
        resolution,
    }
}

/// Slice of `records` between the start and end labels, inclusive.
///
/// - either label missing: the whole sequence (fail-open)
/// - start after end: an empty slice
pub fn filter_range<'a>(records: &'a [MonthlyRecord], range: &DateRange) -> &'a [MonthlyRecord] {
    resolve_range(records, range).0
}

fn resolve_range<'a>(
    records: &'a [MonthlyRecord],
    range: &DateRange,
) -> (&'a [MonthlyRecord], RangeResolution) {
    let start = position_of(records, &range.start);
    let end = position_of(records, &range.end);

    match (start, end) {
        (Some(s), Some(e)) if s <= e => (&records[s..=e], RangeResolution::Exact),
        (Some(s), Some(e)) => {
            tracing::debug!(start = %range.start, end = %range.end, s, e, "range start follows end; selection is empty");
            (&records[..0], RangeResolution::Reversed)
        }
        _ => {
            tracing::debug!(start = %range.start, end = %range.end, "range label not found; using all records");
            (records, RangeResolution::FallbackFull)
        }
    }
}

/// Index of the first record carrying `label`.
pub fn position_of(records: &[MonthlyRecord], label: &str) -> Option<usize> {
    records.iter().position(|r| r.label == label)
}

/// Sums and ratios over `filtered`.
///
/// Sums saturate instead of wrapping; validated datasets never get near the
/// bound (see `io::validate_records`).
pub fn compute_totals(filtered: &[MonthlyRecord]) -> AggregateTotals {
    let total_purchase = saturating_sum(filtered.iter().map(|r| r.purchase_amount));
    let total_sales = saturating_sum(filtered.iter().map(|r| r.sales_amount));
    let inventory_sum = saturating_sum(filtered.iter().map(|r| u64::from(r.inventory_level)));

    let net = i128::from(total_sales) - i128::from(total_purchase);
    let net_profit = clamp_i64(net);

    let profit_margin_percent = if total_purchase == 0 {
        None
    } else {
        Some(net as f64 / total_purchase as f64 * 100.0)
    };

    AggregateTotals {
        total_purchase,
        total_sales,
        net_profit,
        profit_margin_percent,
        average_inventory: rounded_mean(inventory_sum, filtered.len() as u64),
    }
}

/// Last record of `filtered` as a recent-activity summary.
pub fn recent_activity(filtered: &[MonthlyRecord]) -> Option<RecentActivity> {
    filtered.last().map(|r| RecentActivity {
        label: r.label.clone(),
        purchase_amount: r.purchase_amount,
        sales_amount: r.sales_amount,
        net_profit: r.net_profit(),
    })
}

fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

/// `round(sum / count)` with halves rounded up, `None` when `count == 0`.
fn rounded_mean(sum: u64, count: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }
    let (sum, count) = (u128::from(sum), u128::from(count));
    u64::try_from((2 * sum + count) / (2 * count)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, month: u32, purchase: u64, sales: u64, inventory: u32) -> MonthlyRecord {
        MonthlyRecord {
            label: label.to_string(),
            short_label: label.to_string(),
            year: 2024,
            month,
            purchase_amount: purchase,
            sales_amount: sales,
            inventory_level: inventory,
            supplier_count: 7,
        }
    }

    fn three_months() -> Vec<MonthlyRecord> {
        vec![
            record("M1", 1, 100, 150, 10),
            record("M2", 2, 200, 150, 20),
            record("M3", 3, 300, 150, 35),
        ]
    }

    #[test]
    fn full_range_totals() {
        let records = three_months();
        let view = aggregate(&records, &DateRange::new("M1", "M3"));

        assert_eq!(view.filtered.len(), 3);
        assert_eq!(view.resolution, RangeResolution::Exact);
        assert_eq!(view.totals.total_purchase, 600);
        assert_eq!(view.totals.total_sales, 450);
        assert_eq!(view.totals.net_profit, -150);
        let margin = view.totals.profit_margin_percent.unwrap();
        assert!((margin - -25.0).abs() < 1e-12, "margin {margin}");
        // (10 + 20 + 35) / 3 = 21.67
        assert_eq!(view.totals.average_inventory, Some(22));
    }

    #[test]
    fn single_month_range() {
        let records = three_months();
        let view = aggregate(&records, &DateRange::new("M2", "M2"));

        assert_eq!(view.filtered.len(), 1);
        assert_eq!(view.filtered[0].label, "M2");
        assert_eq!(view.totals.total_purchase, 200);
        assert_eq!(view.totals.total_sales, 150);
        assert_eq!(view.totals.net_profit, records[1].net_profit());
        assert_eq!(view.totals.average_inventory, Some(20));
        assert_eq!(view.totals.profit_margin_percent, Some(-25.0));
    }

    #[test]
    fn unknown_label_falls_back_to_everything() {
        let records = three_months();
        let view = aggregate(&records, &DateRange::new("X1", "M3"));
        let full = aggregate(&records, &DateRange::new("M1", "M3"));

        assert_eq!(view.resolution, RangeResolution::FallbackFull);
        assert_eq!(view.filtered, &records[..]);
        assert_eq!(view.totals, full.totals);

        let missing_end = filter_range(&records, &DateRange::new("M2", "nope"));
        assert_eq!(missing_end.len(), 3);
    }

    #[test]
    fn reversed_range_is_empty_and_ratios_unavailable() {
        let records = three_months();
        let view = aggregate(&records, &DateRange::new("M3", "M1"));

        assert_eq!(view.resolution, RangeResolution::Reversed);
        assert!(view.filtered.is_empty());
        assert_eq!(view.totals.total_purchase, 0);
        assert_eq!(view.totals.total_sales, 0);
        assert_eq!(view.totals.net_profit, 0);
        assert_eq!(view.totals.average_inventory, None);
        assert_eq!(view.totals.profit_margin_percent, None);
        assert_eq!(view.recent_activity(), None);
    }

    #[test]
    fn every_valid_pair_matches_its_bounds() {
        let records = three_months();
        for s in 0..records.len() {
            for e in s..records.len() {
                let range = DateRange::new(records[s].label.clone(), records[e].label.clone());
                let view = aggregate(&records, &range);
                assert_eq!(view.filtered.len(), e - s + 1);
                assert_eq!(view.filtered.first().unwrap().label, range.start);
                assert_eq!(view.filtered.last().unwrap().label, range.end);
                assert_eq!(
                    view.totals.net_profit,
                    view.totals.total_sales as i64 - view.totals.total_purchase as i64
                );
            }
        }
    }

    #[test]
    fn aggregate_is_repeatable() {
        let records = three_months();
        let range = DateRange::new("M1", "M2");
        assert_eq!(aggregate(&records, &range), aggregate(&records, &range));
    }

    #[test]
    fn zero_purchase_margin_is_unavailable() {
        let records = vec![record("Z", 1, 0, 500, 3)];
        let totals = compute_totals(&records);
        assert_eq!(totals.net_profit, 500);
        assert_eq!(totals.profit_margin_percent, None);
        assert_eq!(totals.average_inventory, Some(3));
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(rounded_mean(3, 2), Some(2));
        assert_eq!(rounded_mean(5, 4), Some(1));
        assert_eq!(rounded_mean(7, 4), Some(2));
        assert_eq!(rounded_mean(0, 0), None);
    }

    #[test]
    fn recent_activity_uses_last_month() {
        let records = three_months();
        let view = aggregate(&records, &DateRange::new("M1", "M2"));
        let recent = view.recent_activity().unwrap();
        assert_eq!(recent.label, "M2");
        assert_eq!(recent.purchase_amount, 200);
        assert_eq!(recent.net_profit, -50);
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_overflowing() {
        let big = u64::MAX / 2 + 10;
        let records = vec![record("A", 1, big, 0, 1), record("B", 2, big, 0, 2)];
        let view = aggregate(&records, &DateRange::new("A", "B"));

        assert_eq!(view.totals.total_purchase, u64::MAX);
        assert_eq!(view.totals.total_sales, 0);
        assert_eq!(view.totals.net_profit, i64::MIN);
        assert_eq!(view.totals.profit_margin_percent, Some(-100.0));
        assert_eq!(view.totals.average_inventory, Some(2));
        assert_eq!(rounded_mean(u64::MAX, 1), Some(u64::MAX));
    }
}
