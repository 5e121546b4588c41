//! Ordering and near-term aggregation over a caller-owned payment snapshot.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Amounted, Payment};
use crate::engine::date_math::days_until_due;
use crate::engine::urgency::DUE_SOON_DAYS;

/// Payments due within this many days (inclusive) produce daily alerts.
pub const ALERT_WINDOW_DAYS: i64 = 2;

/// Orders payments for display: every unpaid payment before every paid one,
/// each group by ascending days until due. Equal keys keep input order.
pub fn sort_payments(payments: &[Payment], today: NaiveDate) -> Vec<&Payment> {
    let mut ordered: Vec<&Payment> = payments.iter().collect();
    ordered.sort_by_key(|payment| (payment.is_paid(), days_until_due(payment.due_date, today)));
    ordered
}

/// Unpaid payments in display order, and paid ones most recently settled first.
pub fn split_upcoming_and_history(
    payments: &[Payment],
    today: NaiveDate,
) -> (Vec<&Payment>, Vec<&Payment>) {
    let (mut history, upcoming): (Vec<&Payment>, Vec<&Payment>) = sort_payments(payments, today)
        .into_iter()
        .partition(|payment| payment.is_paid());
    history.sort_by_key(|payment| Reverse(payment.updated_at));
    (upcoming, history)
}

pub fn overdue_count(payments: &[Payment], today: NaiveDate) -> usize {
    payments
        .iter()
        .filter(|payment| !payment.is_paid() && days_until_due(payment.due_date, today) < 0)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    DueToday,
    DueTomorrow,
    DueInTwoDays,
}

impl AlertKind {
    fn from_days(days: i64) -> Option<Self> {
        match days {
            0 => Some(AlertKind::DueToday),
            1 => Some(AlertKind::DueTomorrow),
            2 => Some(AlertKind::DueInTwoDays),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            AlertKind::DueToday => "DUE TODAY",
            AlertKind::DueTomorrow => "DUE TOMORROW",
            AlertKind::DueInTwoDays => "due in 2 days",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One summarised notice for all unpaid payments sharing a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAlert {
    pub date: NaiveDate,
    pub days_until_due: i64,
    pub total_amount: f64,
    pub count: usize,
    pub kind: AlertKind,
    pub message: String,
}

impl DailyAlert {
    fn new(date: NaiveDate, kind: AlertKind, days: i64, total_amount: f64, count: usize) -> Self {
        let message = match kind {
            AlertKind::DueToday | AlertKind::DueTomorrow => format!(
                "Total of ${total_amount:.2} {} for {count} item(s)!",
                kind.tag()
            ),
            AlertKind::DueInTwoDays => format!(
                "Total of ${total_amount:.2} {} (on {date}) for {count} item(s).",
                kind.tag()
            ),
        };
        Self {
            date,
            days_until_due: days,
            total_amount,
            count,
            kind,
            message,
        }
    }
}

/// Groups unpaid payments due in the next [`ALERT_WINDOW_DAYS`] days by due date,
/// soonest first. Missing amounts count as zero.
pub fn aggregate_daily_alerts(payments: &[Payment], today: NaiveDate) -> Vec<DailyAlert> {
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for payment in payments.iter().filter(|payment| !payment.is_paid()) {
        let days = days_until_due(payment.due_date, today);
        if !(0..=ALERT_WINDOW_DAYS).contains(&days) {
            continue;
        }
        let entry = by_date.entry(payment.due_date).or_insert((0.0, 0));
        entry.0 += payment.amount_or_zero();
        entry.1 += 1;
    }

    by_date
        .into_iter()
        .filter_map(|(date, (total, count))| {
            let days = days_until_due(date, today);
            AlertKind::from_days(days).map(|kind| DailyAlert::new(date, kind, days, total, count))
        })
        .collect()
}

/// Unpaid payments due within the coming week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyOverview<'a> {
    pub count: usize,
    pub total_amount: f64,
    pub payments: Vec<&'a Payment>,
}

pub fn weekly_overview(payments: &[Payment], today: NaiveDate) -> WeeklyOverview<'_> {
    let within_week: Vec<&Payment> = sort_payments(payments, today)
        .into_iter()
        .filter(|payment| {
            !payment.is_paid()
                && (0..=DUE_SOON_DAYS).contains(&days_until_due(payment.due_date, today))
        })
        .collect();
    WeeklyOverview {
        count: within_week.len(),
        total_amount: within_week.iter().map(|payment| payment.amount_or_zero()).sum(),
        payments: within_week,
    }
}
