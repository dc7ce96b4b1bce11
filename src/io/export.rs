//! Export the selected months to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::MonthlyRecord;
use crate::error::AppError;

/// Write one CSV row per month of `records`.
pub fn write_records_csv(path: &Path, records: &[MonthlyRecord]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    write_records(&mut file, records)
        .map_err(|e| AppError::usage(format!("Failed to write export CSV: {e}")))?;

    tracing::info!(path = %path.display(), rows = records.len(), "wrote csv export");
    Ok(())
}

fn write_records<W: Write>(out: &mut W, records: &[MonthlyRecord]) -> std::io::Result<()> {
    writeln!(
        out,
        "label,short_label,year,month,purchase,sales,net_profit,inventory,suppliers"
    )?;

    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&r.label),
            csv_field(&r.short_label),
            r.year,
            r.month,
            r.purchase_amount,
            r.sales_amount,
            r.net_profit(),
            r.inventory_level,
            r.supplier_count,
        )?;
    }
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_header() {
        let records = vec![MonthlyRecord {
            label: "İyun 2022".to_string(),
            short_label: "İyun".to_string(),
            year: 2022,
            month: 6,
            purchase_amount: 30_000,
            sales_amount: 25_500,
            inventory_level: 900,
            supplier_count: 11,
        }];

        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "İyun 2022,İyun,2022,6,30000,25500,-4500,900,11");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }
}
