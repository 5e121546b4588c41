//! Calendar arithmetic on plain dates.
//!
//! Everything here works on `NaiveDate` calendar fields, never on instants, so
//! a day count cannot drift with the caller's timezone or daylight-saving
//! transitions.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::AnchorDay;
use crate::errors::{EngineError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole days from `today` until `due`; negative once `due` has passed.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

/// Moves `date` by `days` calendar days in either direction.
pub fn shift_date(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.ok_or_else(|| out_of_range(date))
}

/// Parses a `YYYY-MM-DD` string at the boundary where external input enters.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(trimmed.to_string()))
}

/// Number of days in `month` of `year` (28-31), or `None` when the month lies
/// outside the representable calendar.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
}

/// The `anchor` day of the given month, pulled back to the month's last day
/// when the month is shorter.
pub fn clamp_to_month(year: i32, month: u32, anchor: AnchorDay) -> Result<NaiveDate> {
    let out_of_calendar = || {
        EngineError::InvalidDate(format!(
            "{year:04}-{month:02} is outside the supported calendar"
        ))
    };
    let last_day = days_in_month(year, month).ok_or_else(out_of_calendar)?;
    NaiveDate::from_ymd_opt(year, month, anchor.get().min(last_day)).ok_or_else(out_of_calendar)
}

/// Year and month reached by moving `months` months from the month of `date`.
pub fn month_offset(date: NaiveDate, months: i32) -> (i32, u32) {
    let index = date.year() * 12 + date.month0() as i32 + months;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn out_of_range(date: NaiveDate) -> EngineError {
    EngineError::InvalidDate(format!("shifting {date} leaves the supported range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        let day = date(2025, 6, 15);
        assert_eq!(days_until_due(day, day), 0);
    }

    #[test]
    fn sign_follows_ordering() {
        let today = date(2025, 3, 1);
        assert_eq!(days_until_due(date(2025, 2, 28), today), -1);
        assert_eq!(days_until_due(date(2025, 3, 31), today), 30);
        assert_eq!(days_until_due(date(2024, 3, 1), today), -365);
    }

    #[test]
    fn counts_across_daylight_saving_boundaries_exactly() {
        // US DST starts 2025-03-09; a date-only count is unaffected.
        assert_eq!(days_until_due(date(2025, 3, 10), date(2025, 3, 8)), 2);
        assert_eq!(days_until_due(date(2025, 11, 3), date(2025, 11, 1)), 2);
    }

    #[test]
    fn shift_date_rolls_over_months_and_years() {
        assert_eq!(shift_date(date(2024, 12, 31), 1).unwrap(), date(2025, 1, 1));
        assert_eq!(shift_date(date(2024, 3, 1), -1).unwrap(), date(2024, 2, 29));
        assert_eq!(shift_date(date(2025, 1, 31), 30).unwrap(), date(2025, 3, 2));
    }

    #[test]
    fn shift_date_reports_overflow() {
        assert!(matches!(
            shift_date(NaiveDate::MAX, 1),
            Err(EngineError::InvalidDate(_))
        ));
    }

    #[test]
    fn parse_date_rejects_impossible_dates() {
        assert_eq!(parse_date(" 2025-02-28 ").unwrap(), date(2025, 2, 28));
        assert_eq!(
            parse_date("2025-02-30"),
            Err(EngineError::InvalidDate("2025-02-30".into()))
        );
        assert!(parse_date("02/03/2025").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2025, 12), Some(31));
    }

    #[test]
    fn last_representable_month_is_reported_not_guessed() {
        let last = NaiveDate::MAX;
        assert_eq!(days_in_month(last.year(), last.month()), None);
        let anchor = AnchorDay::new(1).unwrap();
        assert!(matches!(
            clamp_to_month(last.year(), last.month(), anchor),
            Err(EngineError::InvalidDate(_))
        ));
        assert_eq!(
            clamp_to_month(2025, 2, AnchorDay::new(31).unwrap()).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn month_offset_wraps_years_both_ways() {
        assert_eq!(month_offset(date(2025, 12, 5), 1), (2026, 1));
        assert_eq!(month_offset(date(2025, 1, 5), -1), (2024, 12));
        assert_eq!(month_offset(date(2025, 6, 5), 0), (2025, 6));
    }
}
