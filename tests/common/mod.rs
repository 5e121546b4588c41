#![allow(dead_code)]

use bill_reminder::domain::{AnchorDay, Payment};
use bill_reminder::engine::FixedClock;
use chrono::{Duration, NaiveDate};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::on(date(year, month, day))
}

/// One-time payment due `days` after `today`.
pub fn due_in(name: &str, today: NaiveDate, days: i64) -> Payment {
    Payment::new(name, today + Duration::days(days))
}

/// Monthly payment pinned to `anchor`, currently due on `due`.
pub fn monthly(name: &str, due: NaiveDate, anchor: u32) -> Payment {
    Payment::new(name, due).with_recurrence(AnchorDay::new(anchor).expect("anchor in range"))
}
