use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::errors::Result;

/// Wire and storage format for calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the machine's local timezone.
///
/// Callers that need determinism (tests, recomputation against a fixed day)
/// should pass a date explicitly instead.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)?)
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Number of days in the month containing `date` (28..=31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Whether two dates fall in the same calendar month of the same year.
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Day-of-month `days` calendar days after `date`.
pub fn day_of_month_after(date: NaiveDate, days: i64) -> u32 {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(date)
        .day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(d(2024, 1, 15)), 31);
        assert_eq!(days_in_month(d(2024, 2, 1)), 29);
        assert_eq!(days_in_month(d(2023, 2, 28)), 28);
        assert_eq!(days_in_month(d(2024, 4, 30)), 30);
        assert_eq!(days_in_month(d(2024, 12, 31)), 31);
    }

    #[test]
    fn test_is_same_month_requires_same_year() {
        assert!(is_same_month(d(2024, 3, 1), d(2024, 3, 31)));
        assert!(!is_same_month(d(2024, 3, 1), d(2023, 3, 1)));
        assert!(!is_same_month(d(2024, 3, 31), d(2024, 4, 1)));
    }

    #[test]
    fn test_day_of_month_after_wraps_into_next_month() {
        assert_eq!(day_of_month_after(d(2024, 4, 10), 7), 17);
        assert_eq!(day_of_month_after(d(2024, 4, 29), 7), 6);
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-05-10").unwrap(), d(2024, 5, 10));
        assert_eq!(parse_iso_date(" 2024-05-10 ").unwrap(), d(2024, 5, 10));
        assert!(parse_iso_date("10/05/2024").is_err());
        assert_eq!(format_iso_date(d(2024, 5, 1)), "2024-05-01");
    }
}
