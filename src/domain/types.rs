//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - generated in-memory for a dashboard session
//! - exported to JSON/CSV
//! - reloaded later as a fixed dataset (for plotting or reproducible reports)

use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Label selected as the range start when nothing else is configured.
pub const DEFAULT_RANGE_START: &str = "İyun 2022";
/// Label selected as the range end when nothing else is configured.
pub const DEFAULT_RANGE_END: &str = "Oktyabr 2024";
/// Currency suffix used for amounts.
pub const DEFAULT_CURRENCY: &str = "AZN";
/// Number of consecutive months in the default dataset.
pub const DEFAULT_MONTH_COUNT: usize = 34;
/// Largest purchase or sales figure a single month may carry.
pub const MAX_MONTHLY_AMOUNT: u64 = 1_000_000_000_000;
/// Longest span the generator accepts (a century of months).
pub const MAX_MONTH_COUNT: usize = 1_200;

/// A calendar month.
///
/// Field order matters: the derived `Ord` compares year first, then month,
/// which is chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Build a month, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|d| Self {
            year: d.year(),
            month: d.month(),
        })
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map_err(|e| format!("expected YYYY-MM, got '{trimmed}': {e}"))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    /// The following calendar month.
    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A contiguous window of calendar months used for data generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub first: YearMonth,
    pub count: usize,
}

impl Default for MonthSpan {
    fn default() -> Self {
        Self {
            first: YearMonth {
                year: 2022,
                month: 1,
            },
            count: DEFAULT_MONTH_COUNT,
        }
    }
}

impl MonthSpan {
    /// Iterate the months of the span in order.
    pub fn months(&self) -> impl Iterator<Item = YearMonth> {
        std::iter::successors(Some(self.first), |m| Some(m.succ())).take(self.count)
    }
}

/// One month of supply figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Localized month name plus year, e.g. `"İyun 2022"`. Unique per dataset.
    pub label: String,
    /// Month-name token of `label`, used on chart axes.
    pub short_label: String,
    pub year: i32,
    pub month: u32,
    /// Purchases for the month (whole currency units).
    pub purchase_amount: u64,
    /// Sales for the month (whole currency units).
    pub sales_amount: u64,
    /// Units in stock.
    pub inventory_level: u32,
    pub supplier_count: u32,
}

impl MonthlyRecord {
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Sales minus purchases for this month alone.
    pub fn net_profit(&self) -> i64 {
        clamp_i64(i128::from(self.sales_amount) - i128::from(self.purchase_amount))
    }
}

/// Narrow a wide signed amount, saturating at the `i64` bounds.
pub fn clamp_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// The user-selected view window, expressed as record labels.
///
/// `start` is expected to precede `end`, but nothing enforces it: each side is
/// replaced independently by the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Range covering every record, or `None` for an empty dataset.
    pub fn full(records: &[MonthlyRecord]) -> Option<Self> {
        let first = records.first()?;
        let last = records.last()?;
        Some(Self::new(first.label.clone(), last.label.clone()))
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_START, DEFAULT_RANGE_END)
    }
}

/// Sums and ratios over a selected slice of records.
///
/// Ratio fields are `None` when they are undefined (empty slice, zero
/// purchases) and are rendered as `N/A`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTotals {
    pub total_purchase: u64,
    pub total_sales: u64,
    pub net_profit: i64,
    pub profit_margin_percent: Option<f64>,
    pub average_inventory: Option<u64>,
}

/// Figures for the last month of the selected range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivity {
    pub label: String,
    pub purchase_amount: u64,
    pub sales_amount: u64,
    pub net_profit: i64,
}

/// How a `DateRange` was resolved against the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeResolution {
    /// Both labels found, start at or before end.
    Exact,
    /// A label was not found; the whole dataset is used.
    FallbackFull,
    /// Both labels found but start comes after end; the slice is empty.
    Reversed,
}

/// Fully resolved settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub span: MonthSpan,
    /// Seed for the record generator; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Load records from this dataset file instead of generating them.
    pub dataset: Option<PathBuf>,
    pub range: DateRange,
    pub currency: String,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_dataset: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            span: MonthSpan::default(),
            seed: None,
            dataset: None,
            range: DateRange::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            plot: true,
            plot_width: 100,
            plot_height: 25,
            export_csv: None,
            export_dataset: None,
        }
    }
}
