mod common;

use bill_reminder::domain::{AnchorDay, PaymentStatus};
use bill_reminder::engine::{
    advance_to_next_cycle, aggregate_daily_alerts, classify_urgency, compute_reminder_status,
    days_until_due, shift_date, sort_payments, toggle_paid, AlertKind, Cadence, Clock,
    ReminderState, UrgencyTier,
};
use bill_reminder::engine::date_math::days_in_month;
use bill_reminder::errors::EngineError;
use chrono::Datelike;
use common::{clock_on, date, due_in, monthly};

#[test]
fn days_until_due_is_zero_on_the_same_day_and_signed_otherwise() {
    let mut day = date(2023, 12, 25);
    for _ in 0..800 {
        assert_eq!(days_until_due(day, day), 0);
        let before = shift_date(day, -3).unwrap();
        let after = shift_date(day, 11).unwrap();
        assert!(days_until_due(before, day) < 0);
        assert_eq!(days_until_due(after, day), 11);
        day = shift_date(day, 1).unwrap();
    }
}

#[test]
fn anchor_31_clamps_to_february() {
    let anchor = AnchorDay::new(31).unwrap();
    assert_eq!(
        advance_to_next_cycle(date(2025, 1, 31), anchor).unwrap(),
        date(2025, 2, 28)
    );
    assert_eq!(
        advance_to_next_cycle(date(2024, 1, 31), anchor).unwrap(),
        date(2024, 2, 29)
    );
}

#[test]
fn recurring_series_never_drifts_from_its_anchor() {
    for anchor_day in [29, 30, 31] {
        let anchor = AnchorDay::new(anchor_day).unwrap();
        let mut due = date(2023, 1, anchor_day);
        for _ in 0..48 {
            due = advance_to_next_cycle(due, anchor).unwrap();
            assert!(due.day() >= 28);
            let month_len = days_in_month(due.year(), due.month()).unwrap();
            assert_eq!(due.day(), anchor_day.min(month_len));
        }
        assert_eq!(due, date(2027, 1, anchor_day));
    }
}

#[test]
fn urgency_tiers_match_the_table() {
    assert_eq!(classify_urgency(PaymentStatus::Upcoming, 7), UrgencyTier::DueSoon);
    assert_eq!(classify_urgency(PaymentStatus::Upcoming, 8), UrgencyTier::Upcoming);
    assert_eq!(classify_urgency(PaymentStatus::Upcoming, -1), UrgencyTier::Overdue);
    assert_eq!(classify_urgency(PaymentStatus::Paid, -30), UrgencyTier::Paid);
    assert_eq!(classify_urgency(PaymentStatus::Paid, 3), UrgencyTier::Paid);
}

#[test]
fn guardrail_rejects_settlement_45_days_out() {
    let clock = clock_on(2025, 5, 1);
    let rent = monthly("Rent", date(2025, 6, 15), 15);
    let snapshot = rent.clone();

    let err = toggle_paid(&rent, &clock).unwrap_err();
    assert!(matches!(
        err,
        EngineError::GuardrailViolation {
            days_until_due: 45,
            ..
        }
    ));
    assert_eq!(rent, snapshot);
}

#[test]
fn settling_recurring_payment_opens_next_cycle() {
    let clock = clock_on(2025, 5, 5);
    let rent = monthly("Rent", date(2025, 5, 15), 15);
    assert_eq!(days_until_due(rent.due_date, clock.today()), 10);

    let next = toggle_paid(&rent, &clock).unwrap();
    assert_eq!(next.status, PaymentStatus::Upcoming);
    assert_eq!(next.due_date, date(2025, 6, 15));
}

/// Under one clock reading the round trip restores every field, `updated_at`
/// included.
#[test]
fn one_time_toggle_twice_restores_the_record() {
    let clock = clock_on(2025, 5, 5);
    let original = due_in("Dentist", clock.today(), 12)
        .with_amount(80.0)
        .touched_at(clock.now());

    let paid = toggle_paid(&original, &clock).unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);
    let back = toggle_paid(&paid, &clock).unwrap();
    assert_eq!(back, original);
}

#[test]
fn week_cadence_projection() {
    let cadence = Cadence::lead("1 Week Before + Due Day", 7);
    assert_eq!(compute_reminder_status(7, &cadence).lead, ReminderState::ReadyToSend);
    assert_eq!(compute_reminder_status(3, &cadence).lead, ReminderState::Sent);
    assert_eq!(compute_reminder_status(10, &cadence).lead, ReminderState::Upcoming);
    let overdue = compute_reminder_status(-1, &cadence);
    assert_eq!(overdue.lead, ReminderState::Sent);
    assert_eq!(overdue.due, ReminderState::Sent);
}

#[test]
fn paid_records_sort_after_every_unpaid_record() {
    let today = date(2025, 9, 1);
    let payments = vec![
        due_in("paid-overdue", today, -60).with_status(PaymentStatus::Paid),
        due_in("distant", today, 200),
        due_in("paid-soon", today, 1).with_status(PaymentStatus::Paid),
        due_in("late", today, -2),
        due_in("tomorrow", today, 1),
    ];
    let sorted = sort_payments(&payments, today);
    let first_paid = sorted.iter().position(|p| p.is_paid()).unwrap();
    assert!(sorted[first_paid..].iter().all(|p| p.is_paid()));
    assert!(sorted[..first_paid].iter().all(|p| !p.is_paid()));
    let unpaid: Vec<&str> = sorted[..first_paid].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(unpaid, vec!["late", "tomorrow", "distant"]);
}

#[test]
fn two_payments_due_tomorrow_aggregate_into_one_alert() {
    let today = date(2025, 9, 1);
    let payments = vec![
        due_in("phone", today, 1).with_amount(100.0),
        due_in("internet", today, 1).with_amount(50.0),
    ];
    let alerts = aggregate_daily_alerts(&payments, today);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].date, date(2025, 9, 2));
    assert_eq!(alerts[0].count, 2);
    assert_eq!(alerts[0].total_amount, 150.0);
    assert_eq!(alerts[0].kind, AlertKind::DueTomorrow);
    assert_eq!(alerts[0].kind.tag(), "DUE TOMORROW");
}
