//! Payment lifecycle and due-date engine.
//!
//! Pure functions over explicit inputs: the caller passes a snapshot of
//! payments and the current date and gets derived views or an updated record
//! back. Nothing here holds state or performs I/O.

pub mod aggregate;
pub mod clock;
pub mod dashboard;
pub mod date_math;
pub mod guardrail;
pub mod recurrence;
pub mod reminder;
pub mod urgency;

pub use aggregate::{
    aggregate_daily_alerts, overdue_count, sort_payments, split_upcoming_and_history,
    weekly_overview, AlertKind, DailyAlert, WeeklyOverview, ALERT_WINDOW_DAYS,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{Dashboard, PaymentView};
pub use date_math::{days_until_due, parse_date, shift_date};
pub use guardrail::{toggle_paid, GUARDRAIL_WINDOW_DAYS};
pub use recurrence::{advance_to_next_cycle, next_occurrence_on_or_after};
pub use reminder::{
    compute_reminder_status, reminder_schedule, Cadence, CadenceTable, ReminderKind,
    ReminderState, ReminderStatus, ScheduledReminder, DEFAULT_CADENCE,
};
pub use urgency::{classify_urgency, due_label, UrgencyTier, DUE_SOON_DAYS};
