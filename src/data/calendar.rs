//! Month labels.
//!
//! Labels are the Azerbaijani month name followed by the 4-digit year. They
//! double as the lookup keys for range selection, so they must be unique per
//! dataset; one label per calendar month guarantees that.

use crate::domain::YearMonth;

const MONTH_NAMES: [&str; 12] = [
    "Yanvar", "Fevral", "Mart", "Aprel", "May", "İyun", "İyul", "Avqust", "Sentyabr", "Oktyabr",
    "Noyabr", "Dekabr",
];

/// Localized name for a month number (`1..=12`).
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

/// Display label for a month, e.g. `"İyun 2022"`.
pub fn month_label(ym: YearMonth) -> String {
    let name = month_name(ym.month).unwrap_or("?");
    format!("{name} {}", ym.year)
}

/// Month-name token of a label (everything before the first whitespace).
pub fn short_label(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_localized_names() {
        let june = YearMonth::new(2022, 6).unwrap();
        assert_eq!(month_label(june), "İyun 2022");
        assert_eq!(month_label(YearMonth::new(2024, 10).unwrap()), "Oktyabr 2024");
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn short_label_takes_first_token() {
        assert_eq!(short_label("Sentyabr 2023"), "Sentyabr");
        assert_eq!(short_label("M1"), "M1");
        assert_eq!(short_label(""), "");
    }
}
