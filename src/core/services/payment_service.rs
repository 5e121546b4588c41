//! Validated creation, editing and settlement of payments.

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::core::services::ServiceResult;
use crate::domain::{AnchorDay, Payment, PaymentDraft, PaymentPatch, DEFAULT_CATEGORY};
use crate::engine::clock::Clock;
use crate::engine::date_math::{parse_date, shift_date};
use crate::engine::guardrail;
use crate::engine::recurrence::next_occurrence_on_or_after;
use crate::errors::{EngineError, Result};
use crate::storage::PaymentRepository;

/// Turns raw drafts into valid payments and applies lifecycle transitions to a
/// repository.
pub struct PaymentService;

impl PaymentService {
    /// Validates `draft` and builds a new payment with a fresh identifier.
    pub fn create(draft: &PaymentDraft, config: &EngineConfig, clock: &dyn Clock) -> Result<Payment> {
        build_payment(Uuid::new_v4(), draft, config, clock)
    }

    /// Re-validates `draft` as a replacement for `existing`, keeping its id.
    pub fn edit(
        existing: &Payment,
        draft: &PaymentDraft,
        config: &EngineConfig,
        clock: &dyn Clock,
    ) -> Result<Payment> {
        build_payment(existing.id, draft, config, clock)
    }

    /// Creates a payment from `draft` and stores it.
    pub fn add(
        repo: &dyn PaymentRepository,
        draft: &PaymentDraft,
        config: &EngineConfig,
        clock: &dyn Clock,
    ) -> ServiceResult<Payment> {
        let payment = Self::create(draft, config, clock)?;
        repo.create(payment.clone())?;
        info!(payment = %payment.id, name = %payment.name, due = %payment.due_date, "payment created");
        Ok(payment)
    }

    /// Replaces the stored payment `id` with the validated `draft`.
    pub fn update(
        repo: &dyn PaymentRepository,
        id: Uuid,
        draft: &PaymentDraft,
        config: &EngineConfig,
        clock: &dyn Clock,
    ) -> ServiceResult<Payment> {
        let current = repo.get(id)?;
        let edited = Self::edit(&current, draft, config, clock)?;
        let stored = repo.update(id, &PaymentPatch::between(&current, &edited))?;
        info!(payment = %id, "payment edited");
        Ok(stored)
    }

    /// Runs the paid toggle on the stored payment and persists the outcome.
    /// A guardrail rejection leaves the repository untouched.
    pub fn toggle_paid(
        repo: &dyn PaymentRepository,
        id: Uuid,
        clock: &dyn Clock,
    ) -> ServiceResult<Payment> {
        let current = repo.get(id)?;
        let next = guardrail::toggle_paid(&current, clock).inspect_err(|err| {
            warn!(payment = %id, error = %err, "paid toggle rejected");
        })?;
        let stored = repo.update(id, &PaymentPatch::between(&current, &next))?;
        info!(
            payment = %id,
            status = %stored.status,
            due = %stored.due_date,
            "paid state toggled"
        );
        Ok(stored)
    }

    pub fn remove(repo: &dyn PaymentRepository, id: Uuid) -> ServiceResult<Payment> {
        let removed = repo.delete(id)?;
        info!(payment = %id, "payment removed");
        Ok(removed)
    }
}

fn build_payment(
    id: Uuid,
    draft: &PaymentDraft,
    config: &EngineConfig,
    clock: &dyn Clock,
) -> Result<Payment> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(EngineError::InvalidName);
    }

    let amount = parse_amount("amount", draft.amount.as_deref())?;
    let min_payment_amount = parse_amount("min_payment_amount", draft.min_payment_amount.as_deref())?;
    if let (Some(full), Some(min)) = (amount, min_payment_amount) {
        if min > full {
            warn!(
                payment = name,
                amount = full,
                min_payment_amount = min,
                "minimum payment exceeds amount"
            );
        }
    }

    let reminder_cadence = non_blank(draft.reminder_cadence.as_deref())
        .unwrap_or(&config.default_cadence)
        .to_string();
    config.cadences.resolve(&reminder_cadence)?;

    let category_tag = non_blank(draft.category_tag.as_deref())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let (due_date, recurring_anchor_day) = if draft.is_recurring {
        let (due, anchor) = recurring_schedule(draft, clock.today())?;
        (due, Some(anchor))
    } else {
        let raw = non_blank(draft.due_date.as_deref())
            .ok_or_else(|| EngineError::InvalidDate("due date is required".into()))?;
        (parse_date(raw)?, None)
    };

    Ok(Payment {
        id,
        name: name.to_string(),
        amount,
        min_payment_amount,
        due_date,
        status: draft.status.unwrap_or_default(),
        is_recurring: draft.is_recurring,
        recurring_anchor_day,
        category_tag,
        reminder_cadence,
        updated_at: clock.now(),
    })
}

/// First due date and anchor of a recurring series.
///
/// The anchor is the explicit day when given, else the start date's day. A
/// start date today or later is kept as the first occurrence; a past one
/// schedules the next occurrence after today. Without a start date, an
/// explicit due date (an edited series) is kept, otherwise the first
/// occurrence on or after today is used.
fn recurring_schedule(draft: &PaymentDraft, today: NaiveDate) -> Result<(NaiveDate, AnchorDay)> {
    let start = non_blank(draft.recurring_start_date.as_deref())
        .map(parse_date)
        .transpose()?;
    let anchor = match (draft.recurring_anchor_day, start) {
        (Some(day), _) => AnchorDay::new(day)?,
        (None, Some(start)) => AnchorDay::of(start),
        (None, None) => {
            return Err(EngineError::InvalidRecurrenceDay(
                "recurring payment needs a start date or anchor day".into(),
            ))
        }
    };

    let due = match start {
        Some(start) if start >= today => next_occurrence_on_or_after(anchor, shift_date(start, -1)?)?,
        Some(_) => next_occurrence_on_or_after(anchor, today)?,
        None => match non_blank(draft.due_date.as_deref()) {
            Some(raw) => parse_date(raw)?,
            None => next_occurrence_on_or_after(anchor, shift_date(today, -1)?)?,
        },
    };
    Ok((due, anchor))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Parses an optional decimal amount, rounded to cents.
fn parse_amount(field: &'static str, raw: Option<&str>) -> Result<Option<f64>> {
    let Some(text) = non_blank(raw) else {
        return Ok(None);
    };
    let invalid = || EngineError::InvalidAmount {
        field,
        value: text.to_string(),
    };
    let value: f64 = text.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(Some((value * 100.0).round() / 100.0))
}
