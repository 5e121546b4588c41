use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PaymentStatus;

/// Payments due within this many days (inclusive) are due soon.
pub const DUE_SOON_DAYS: i64 = 7;

/// Display urgency derived from status and days until due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyTier {
    Paid,
    Overdue,
    DueSoon,
    Upcoming,
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UrgencyTier::Paid => "Paid",
            UrgencyTier::Overdue => "Overdue",
            UrgencyTier::DueSoon => "Due Soon",
            UrgencyTier::Upcoming => "Upcoming",
        };
        f.write_str(label)
    }
}

/// Classifies a payment. Recompute on every query; the tier moves with the clock.
pub fn classify_urgency(status: PaymentStatus, days_until_due: i64) -> UrgencyTier {
    match status {
        PaymentStatus::Paid => UrgencyTier::Paid,
        PaymentStatus::Upcoming if days_until_due < 0 => UrgencyTier::Overdue,
        PaymentStatus::Upcoming if days_until_due <= DUE_SOON_DAYS => UrgencyTier::DueSoon,
        PaymentStatus::Upcoming => UrgencyTier::Upcoming,
    }
}

/// Short relative description such as "Due tomorrow" or "3 days overdue".
pub fn due_label(status: PaymentStatus, days_until_due: i64) -> String {
    if status == PaymentStatus::Paid {
        return "Paid".into();
    }
    match days_until_due {
        0 => "Due today".into(),
        1 => "Due tomorrow".into(),
        -1 => "1 day overdue".into(),
        days if days < 0 => format!("{} days overdue", days.unsigned_abs()),
        days => format!("{days} days away"),
    }
}
