//! Every derived view of a payment snapshot in one pass.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Payment;
use crate::engine::aggregate::{
    aggregate_daily_alerts, overdue_count, split_upcoming_and_history, weekly_overview, DailyAlert,
    WeeklyOverview,
};
use crate::engine::date_math::days_until_due;
use crate::engine::reminder::{
    compute_reminder_status, Cadence, CadenceTable, ReminderState, ReminderStatus,
};
use crate::engine::urgency::{classify_urgency, due_label, UrgencyTier};

/// A payment together with the values derived from it for one reading of the clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView<'a> {
    pub payment: &'a Payment,
    pub days_until_due: i64,
    pub tier: UrgencyTier,
    pub reminder: ReminderStatus,
    pub due_label: String,
}

impl<'a> PaymentView<'a> {
    /// Unknown cadence names resolve to `fallback_cadence`; when that is missing
    /// too, reminders show as disabled.
    pub fn new(
        payment: &'a Payment,
        today: NaiveDate,
        cadences: &CadenceTable,
        fallback_cadence: &str,
    ) -> Self {
        let days = days_until_due(payment.due_date, today);
        let reminder = cadences
            .resolve_or(&payment.reminder_cadence, fallback_cadence)
            .map(|cadence: &Cadence| compute_reminder_status(days, cadence))
            .unwrap_or(ReminderStatus {
                lead: ReminderState::Disabled,
                due: ReminderState::Disabled,
            });
        Self {
            payment,
            days_until_due: days,
            tier: classify_urgency(payment.status, days),
            reminder,
            due_label: due_label(payment.status, days),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub today: NaiveDate,
    pub upcoming: Vec<PaymentView<'a>>,
    pub history: Vec<PaymentView<'a>>,
    pub overdue_count: usize,
    pub alerts: Vec<DailyAlert>,
    pub week: WeeklyOverview<'a>,
}

impl<'a> Dashboard<'a> {
    pub fn build(
        payments: &'a [Payment],
        today: NaiveDate,
        cadences: &CadenceTable,
        fallback_cadence: &str,
    ) -> Self {
        let view = |payment: &'a Payment| PaymentView::new(payment, today, cadences, fallback_cadence);
        let (upcoming, history) = split_upcoming_and_history(payments, today);
        Self {
            today,
            upcoming: upcoming.into_iter().map(view).collect(),
            history: history.into_iter().map(view).collect(),
            overdue_count: overdue_count(payments, today),
            alerts: aggregate_daily_alerts(payments, today),
            week: weekly_overview(payments, today),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentStatus;
    use crate::engine::reminder::{CADENCE_OFF, CADENCE_ONE_WEEK_BEFORE, DEFAULT_CADENCE};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_views_for_every_payment() {
        let today = date(2025, 7, 1);
        let payments = vec![
            Payment::new("Insurance", date(2025, 7, 8))
                .with_amount(80.0)
                .with_cadence(CADENCE_ONE_WEEK_BEFORE),
            Payment::new("Parking", date(2025, 6, 28)).with_cadence(CADENCE_OFF),
            Payment::new("Stream", date(2025, 7, 2))
                .with_amount(9.99)
                .with_cadence("unknown"),
            Payment::new("Old", date(2025, 6, 1)).with_status(PaymentStatus::Paid),
        ];

        let dashboard = Dashboard::build(&payments, today, CadenceTable::builtin(), DEFAULT_CADENCE);

        assert_eq!(dashboard.overdue_count, 1);
        assert_eq!(dashboard.upcoming.len(), 3);
        assert_eq!(dashboard.history.len(), 1);
        assert_eq!(dashboard.history[0].tier, UrgencyTier::Paid);

        let parking = &dashboard.upcoming[0];
        assert_eq!(parking.payment.name, "Parking");
        assert_eq!(parking.tier, UrgencyTier::Overdue);
        assert_eq!(parking.reminder.lead, ReminderState::Disabled);
        assert_eq!(parking.due_label, "3 days overdue");

        let stream = &dashboard.upcoming[1];
        assert_eq!(stream.reminder.lead, ReminderState::ReadyToSend);
        assert_eq!(stream.due_label, "Due tomorrow");

        let insurance = &dashboard.upcoming[2];
        assert_eq!(insurance.tier, UrgencyTier::DueSoon);
        assert_eq!(insurance.reminder.lead, ReminderState::ReadyToSend);
        assert_eq!(insurance.reminder.due, ReminderState::Upcoming);

        assert_eq!(dashboard.alerts.len(), 1);
        assert_eq!(dashboard.week.count, 2);
        assert!(!dashboard.is_empty());
    }
}
