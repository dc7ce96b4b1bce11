//! Per-session dashboard state.
//!
//! A session owns the records (produced once, never regenerated) and the
//! currently selected range. Views are derived on demand via `report::aggregate`.

use crate::domain::{DateRange, MonthlyRecord};
use crate::report::{RangeView, aggregate, position_of};

#[derive(Debug, Clone)]
pub struct DashboardSession {
    records: Vec<MonthlyRecord>,
    range: DateRange,
    /// Seed the records were generated from; `None` for loaded datasets.
    seed: Option<u64>,
}

/// Which side of the range a selector edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

impl DashboardSession {
    pub fn new(records: Vec<MonthlyRecord>, range: DateRange, seed: Option<u64>) -> Self {
        Self { records, range, seed }
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Labels selectable in either selector, in calendar order.
    pub fn available_labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.label.as_str())
    }

    /// Replace the start label. No check against `end`.
    pub fn set_start(&mut self, label: impl Into<String>) {
        self.range.start = label.into();
    }

    /// Replace the end label. No check against `start`.
    pub fn set_end(&mut self, label: impl Into<String>) {
        self.range.end = label.into();
    }

    pub fn set_bound(&mut self, bound: RangeBound, label: impl Into<String>) {
        match bound {
            RangeBound::Start => self.set_start(label),
            RangeBound::End => self.set_end(label),
        }
    }

    /// Current selection and totals.
    pub fn view(&self) -> RangeView<'_> {
        aggregate(&self.records, &self.range)
    }

    /// Index of the label a selector currently points at.
    ///
    /// Unresolvable labels map to the matching end of the dataset, which is
    /// where the fail-open view starts and ends.
    pub fn bound_index(&self, bound: RangeBound) -> usize {
        let label = match bound {
            RangeBound::Start => &self.range.start,
            RangeBound::End => &self.range.end,
        };
        position_of(&self.records, label).unwrap_or(match bound {
            RangeBound::Start => 0,
            RangeBound::End => self.records.len().saturating_sub(1),
        })
    }

    /// Move a selector by `delta` months, clamped to the dataset.
    pub fn step_bound(&mut self, bound: RangeBound, delta: isize) {
        if self.records.is_empty() {
            return;
        }
        let last = self.records.len() - 1;
        let next = self
            .bound_index(bound)
            .saturating_add_signed(delta)
            .min(last);
        let label = self.records[next].label.clone();
        self.set_bound(bound, label);
    }

    /// Jump a selector to the first or last month.
    pub fn jump_bound(&mut self, bound: RangeBound, to_end: bool) {
        let record = if to_end {
            self.records.last()
        } else {
            self.records.first()
        };
        if let Some(record) = record {
            let label = record.label.clone();
            self.set_bound(bound, label);
        }
    }

    /// Exchange start and end labels.
    pub fn swap_bounds(&mut self) {
        std::mem::swap(&mut self.range.start, &mut self.range.end);
    }
}
