//! Calendar labels for projection months

use chrono::{Datelike, NaiveDate};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Horizons longer than this carry the year in every label
pub const LABEL_YEAR_THRESHOLD: u32 = 12;

/// Calendar (year, month0) of a 1-based projection month
///
/// Month 1 is the calendar month after `as_of`.
pub fn calendar_month(as_of: NaiveDate, projection_month: u32) -> (i32, u32) {
    let offset = as_of.month0() + projection_month;
    let year = as_of.year() + (offset / 12) as i32;
    (year, offset % 12)
}

/// Label for a single projection month
pub fn month_label(as_of: NaiveDate, projection_month: u32, include_year: bool) -> String {
    let (year, month0) = calendar_month(as_of, projection_month);
    let abbreviation = MONTH_ABBREVIATIONS[month0 as usize];
    if include_year {
        format!("{} {}", abbreviation, year)
    } else {
        abbreviation.to_string()
    }
}

/// Labels for months 1..=`months`
pub fn month_labels(as_of: NaiveDate, months: u32) -> Vec<String> {
    let include_year = months > LABEL_YEAR_THRESHOLD;
    (1..=months)
        .map(|month| month_label(as_of, month, include_year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_month_is_next_calendar_month() {
        assert_eq!(calendar_month(date(2026, 10, 17), 1), (2026, 10));
        assert_eq!(calendar_month(date(2026, 12, 31), 1), (2027, 0));
        assert_eq!(month_label(date(2026, 3, 1), 1, false), "Apr");
    }

    #[test]
    fn test_short_horizon_has_no_year() {
        let labels = month_labels(date(2026, 10, 17), 12);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Nov");
        assert_eq!(labels[2], "Jan");
        assert_eq!(labels[11], "Oct");
    }

    #[test]
    fn test_long_horizon_disambiguates_years() {
        let labels = month_labels(date(2026, 10, 17), 24);
        assert_eq!(labels[0], "Nov 2026");
        assert_eq!(labels[1], "Dec 2026");
        assert_eq!(labels[2], "Jan 2027");
        assert_eq!(labels[12], "Nov 2027");
        assert_eq!(labels[23], "Oct 2028");
    }

    #[test]
    fn test_zero_months() {
        assert!(month_labels(date(2026, 1, 1), 0).is_empty());
    }
}
