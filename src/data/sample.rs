//! Synthetic monthly supply figures.
//!
//! The generator takes the random source as a parameter so tests (and the
//! `--seed` flag) can pin the exact values.

use std::ops::Range;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::data::calendar::{month_label, short_label};
use crate::domain::{MAX_MONTH_COUNT, MonthSpan, MonthlyRecord};
use crate::error::AppError;

/// Monthly purchases, AZN.
pub const PURCHASE_RANGE: Range<u64> = 20_000..70_000;
/// Monthly sales, AZN.
pub const SALES_RANGE: Range<u64> = 15_000..55_000;
/// Units in stock.
pub const INVENTORY_RANGE: Range<u32> = 500..1_500;
pub const SUPPLIER_RANGE: Range<u32> = 5..20;

/// A generated dataset plus the seed that produced it.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub records: Vec<MonthlyRecord>,
    pub seed: u64,
}

/// Generate one record per month of `span`, drawing every numeric field
/// uniformly from its range.
pub fn generate_records<R: Rng + ?Sized>(
    span: &MonthSpan,
    rng: &mut R,
) -> Result<Vec<MonthlyRecord>, AppError> {
    if span.count == 0 {
        return Err(AppError::usage("Month count must be > 0."));
    }
    if span.count > MAX_MONTH_COUNT {
        return Err(AppError::usage(format!(
            "Month count must be at most {MAX_MONTH_COUNT} (got {}).",
            span.count
        )));
    }

    let mut records = Vec::with_capacity(span.count);
    for ym in span.months() {
        let label = month_label(ym);
        let short = short_label(&label).to_string();
        records.push(MonthlyRecord {
            short_label: short,
            label,
            year: ym.year,
            month: ym.month,
            purchase_amount: rng.gen_range(PURCHASE_RANGE),
            sales_amount: rng.gen_range(SALES_RANGE),
            inventory_level: rng.gen_range(INVENTORY_RANGE),
            supplier_count: rng.gen_range(SUPPLIER_RANGE),
        });
    }
    Ok(records)
}

/// Generate a dataset from a fixed seed.
pub fn generate_seeded(span: &MonthSpan, seed: u64) -> Result<SampleData, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let records = generate_records(span, &mut rng)?;
    Ok(SampleData { records, seed })
}

/// Generate a dataset, drawing a fresh seed when none is configured.
///
/// The seed is logged so a session can be reproduced with `--seed`.
pub fn generate_sample(span: &MonthSpan, seed: Option<u64>) -> Result<SampleData, AppError> {
    let seed = seed.unwrap_or_else(|| thread_rng().r#gen());
    tracing::info!(seed, first = %span.first, months = span.count, "generating supply records");
    generate_seeded(span, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearMonth;

    #[test]
    fn default_span_has_34_ordered_months() {
        let sample = generate_seeded(&MonthSpan::default(), 7).unwrap();
        let records = &sample.records;
        assert_eq!(records.len(), 34);
        assert_eq!(records[0].label, "Yanvar 2022");
        assert_eq!(records[5].label, "İyun 2022");
        assert_eq!(records[33].label, "Oktyabr 2024");
        assert_eq!(records[33].short_label, "Oktyabr");
        assert_eq!(records[12].year, 2023);
        assert!(records.windows(2).all(|w| w[0].year_month() < w[1].year_month()));
    }

    #[test]
    fn fields_stay_within_ranges() {
        let sample = generate_seeded(&MonthSpan::default(), 123).unwrap();
        for r in &sample.records {
            assert!(PURCHASE_RANGE.contains(&r.purchase_amount), "purchase {}", r.purchase_amount);
            assert!(SALES_RANGE.contains(&r.sales_amount), "sales {}", r.sales_amount);
            assert!(INVENTORY_RANGE.contains(&r.inventory_level), "inventory {}", r.inventory_level);
            assert!(SUPPLIER_RANGE.contains(&r.supplier_count), "suppliers {}", r.supplier_count);
        }
    }

    #[test]
    fn same_seed_same_records() {
        let span = MonthSpan::default();
        let a = generate_seeded(&span, 42).unwrap();
        let b = generate_seeded(&span, 42).unwrap();
        assert_eq!(a.records, b.records);

        let c = generate_seeded(&span, 43).unwrap();
        assert_ne!(a.records, c.records);
    }

    #[test]
    fn unseeded_sample_reports_its_seed() {
        let span = MonthSpan {
            first: YearMonth::new(2023, 11).unwrap(),
            count: 4,
        };
        let sample = generate_sample(&span, None).unwrap();
        let replay = generate_seeded(&span, sample.seed).unwrap();
        assert_eq!(sample.records, replay.records);
        assert_eq!(sample.records[2].label, "Yanvar 2024");
    }

    #[test]
    fn empty_span_is_rejected() {
        let span = MonthSpan {
            first: YearMonth::new(2022, 1).unwrap(),
            count: 0,
        };
        let err = generate_seeded(&span, 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn oversized_span_is_rejected() {
        let first = YearMonth::new(2022, 1).unwrap();
        let err = generate_seeded(&MonthSpan { first, count: usize::MAX }, 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err = generate_seeded(&MonthSpan { first, count: MAX_MONTH_COUNT + 1 }, 1).unwrap_err();
        assert!(err.message().contains("at most"), "{err}");

        let longest = generate_seeded(&MonthSpan { first, count: MAX_MONTH_COUNT }, 1).unwrap();
        assert_eq!(longest.records.len(), MAX_MONTH_COUNT);
        assert_eq!(longest.records[MAX_MONTH_COUNT - 1].label, "Dekabr 2121");
    }
}
