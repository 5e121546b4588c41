//! The paid toggle and its guardrail for recurring payments.

use tracing::debug;

use crate::domain::{Payment, PaymentStatus};
use crate::engine::clock::Clock;
use crate::engine::date_math::days_until_due;
use crate::engine::recurrence::advance_to_next_cycle;
use crate::errors::{EngineError, Result};

/// Recurring payments can be settled only when fewer than this many days
/// remain before the due date.
pub const GUARDRAIL_WINDOW_DAYS: i64 = 30;

/// Flips a payment between `Upcoming` and `Paid`, returning the updated record.
///
/// Settling a recurring payment rolls it straight into its next cycle: the due
/// date advances by one anchored month and the status stays `Upcoming`. That
/// transition is refused with [`EngineError::GuardrailViolation`] while the due
/// date is [`GUARDRAIL_WINDOW_DAYS`] or more days away. The input record is never
/// modified.
///
/// Settling stamps `updated_at`; reverting a paid record only flips its status,
/// so `updated_at` keeps the settlement time.
pub fn toggle_paid(payment: &Payment, clock: &dyn Clock) -> Result<Payment> {
    let mut next = payment.clone();

    match payment.status {
        PaymentStatus::Paid => {
            next.status = PaymentStatus::Upcoming;
        }
        PaymentStatus::Upcoming if !payment.is_recurring => {
            next.status = PaymentStatus::Paid;
            next.updated_at = clock.now();
        }
        PaymentStatus::Upcoming => {
            let anchor = payment.anchor_day()?;
            let days = days_until_due(payment.due_date, clock.today());
            if days >= GUARDRAIL_WINDOW_DAYS {
                return Err(EngineError::GuardrailViolation {
                    days_until_due: days,
                    window: GUARDRAIL_WINDOW_DAYS,
                });
            }
            next.due_date = advance_to_next_cycle(payment.due_date, anchor)?;
            next.status = PaymentStatus::Upcoming;
            next.updated_at = clock.now();
        }
    }

    debug!(
        payment = %payment.id,
        from = %payment.status,
        to = %next.status,
        due = %next.due_date,
        "toggled paid state"
    );
    Ok(next)
}
