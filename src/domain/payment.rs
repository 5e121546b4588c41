//! Payment records, recurrence anchor, and the draft/patch shapes used at the
//! engine boundary.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::engine::reminder::DEFAULT_CADENCE;
use crate::errors::{EngineError, Result};

/// Category applied when a payment carries no tag.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Canonical day-of-month (1-31) a recurring series is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AnchorDay(u32);

impl AnchorDay {
    pub const FIRST: u32 = 1;
    pub const LAST: u32 = 31;

    pub fn new(day: u32) -> Result<Self> {
        if (Self::FIRST..=Self::LAST).contains(&day) {
            Ok(Self(day))
        } else {
            Err(EngineError::InvalidRecurrenceDay(format!(
                "anchor day {day} is outside {}..={}",
                Self::FIRST,
                Self::LAST
            )))
        }
    }

    /// Anchor taken from the day-of-month of `date`; always in range.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.day())
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for AnchorDay {
    type Error = EngineError;

    fn try_from(day: u32) -> Result<Self> {
        AnchorDay::new(day)
    }
}

impl From<AnchorDay> for u32 {
    fn from(anchor: AnchorDay) -> u32 {
        anchor.0
    }
}

impl fmt::Display for AnchorDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Upcoming,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Upcoming => "Upcoming",
            PaymentStatus::Paid => "Paid",
        };
        f.write_str(label)
    }
}

/// One bill or obligation owned by the caller's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_payment_amount: Option<f64>,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_anchor_day: Option<AnchorDay>,
    #[serde(default = "default_category")]
    pub category_tag: String,
    #[serde(default = "default_cadence")]
    pub reminder_cadence: String,
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_cadence() -> String {
    DEFAULT_CADENCE.to_string()
}

impl Payment {
    /// Creates an upcoming one-time payment with the default cadence and tag.
    pub fn new(name: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount: None,
            min_payment_amount: None,
            due_date,
            status: PaymentStatus::Upcoming,
            is_recurring: false,
            recurring_anchor_day: None,
            category_tag: default_category(),
            reminder_cadence: default_cadence(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Turns the payment into a monthly series pinned to `anchor`.
    pub fn with_recurrence(mut self, anchor: AnchorDay) -> Self {
        self.is_recurring = true;
        self.recurring_anchor_day = Some(anchor);
        self
    }

    pub fn with_cadence(mut self, cadence: impl Into<String>) -> Self {
        self.reminder_cadence = cadence.into();
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn touched_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Anchor day of a recurring payment, or the error explaining why the
    /// series has none.
    pub fn anchor_day(&self) -> Result<AnchorDay> {
        if !self.is_recurring {
            return Err(EngineError::InvalidRecurrenceDay(
                "payment is not recurring".into(),
            ));
        }
        self.recurring_anchor_day.ok_or_else(|| {
            EngineError::InvalidRecurrenceDay("recurring payment has no anchor day".into())
        })
    }

    /// Checks the record-level invariants that deserialisation alone cannot
    /// guarantee.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidName);
        }
        check_amount("amount", self.amount)?;
        check_amount("min_payment_amount", self.min_payment_amount)?;
        if self.is_recurring {
            self.anchor_day()?;
        }
        Ok(())
    }
}

fn check_amount(field: &'static str, amount: Option<f64>) -> Result<()> {
    match amount {
        Some(value) if !value.is_finite() || value < 0.0 => Err(EngineError::InvalidAmount {
            field,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Payment {
    fn amount(&self) -> Option<f64> {
        self.amount
    }
}

impl Displayable for Payment {
    fn display_label(&self) -> String {
        let amount = self
            .amount
            .map(|value| format!("${value:.2}"))
            .unwrap_or_else(|| "--".into());
        let series = if self.is_recurring { " (monthly)" } else { "" };
        format!("{} {}{} due {}", self.name, amount, series, self.due_date)
    }
}

/// Raw, unvalidated payment input as it arrives from a form or an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub name: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub min_payment_amount: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_start_date: Option<String>,
    #[serde(default)]
    pub recurring_anchor_day: Option<u32>,
    #[serde(default)]
    pub category_tag: Option<String>,
    #[serde(default)]
    pub reminder_cadence: Option<String>,
}

impl PaymentDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Prefills a draft from an existing record, as an edit form would.
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            name: payment.name.clone(),
            amount: payment.amount.map(|value| format!("{value:.2}")),
            min_payment_amount: payment.min_payment_amount.map(|value| format!("{value:.2}")),
            due_date: Some(payment.due_date.format("%Y-%m-%d").to_string()),
            status: Some(payment.status),
            is_recurring: payment.is_recurring,
            recurring_start_date: None,
            recurring_anchor_day: payment.recurring_anchor_day.map(AnchorDay::get),
            category_tag: Some(payment.category_tag.clone()),
            reminder_cadence: Some(payment.reminder_cadence.clone()),
        }
    }
}

/// Field-level update for a stored payment. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentPatch {
    pub name: Option<String>,
    pub amount: Option<Option<f64>>,
    pub min_payment_amount: Option<Option<f64>>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub is_recurring: Option<bool>,
    pub recurring_anchor_day: Option<Option<AnchorDay>>,
    pub category_tag: Option<String>,
    pub reminder_cadence: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
    (before != after).then(|| after.clone())
}

impl PaymentPatch {
    /// Builds the patch that turns `before` into `after`.
    pub fn between(before: &Payment, after: &Payment) -> Self {
        Self {
            name: changed(&before.name, &after.name),
            amount: changed(&before.amount, &after.amount),
            min_payment_amount: changed(&before.min_payment_amount, &after.min_payment_amount),
            due_date: changed(&before.due_date, &after.due_date),
            status: changed(&before.status, &after.status),
            is_recurring: changed(&before.is_recurring, &after.is_recurring),
            recurring_anchor_day: changed(&before.recurring_anchor_day, &after.recurring_anchor_day),
            category_tag: changed(&before.category_tag, &after.category_tag),
            reminder_cadence: changed(&before.reminder_cadence, &after.reminder_cadence),
            updated_at: changed(&before.updated_at, &after.updated_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, payment: &mut Payment) {
        if let Some(name) = &self.name {
            payment.name = name.clone();
        }
        if let Some(amount) = self.amount {
            payment.amount = amount;
        }
        if let Some(amount) = self.min_payment_amount {
            payment.min_payment_amount = amount;
        }
        if let Some(due_date) = self.due_date {
            payment.due_date = due_date;
        }
        if let Some(status) = self.status {
            payment.status = status;
        }
        if let Some(is_recurring) = self.is_recurring {
            payment.is_recurring = is_recurring;
        }
        if let Some(anchor) = self.recurring_anchor_day {
            payment.recurring_anchor_day = anchor;
        }
        if let Some(tag) = &self.category_tag {
            payment.category_tag = tag.clone();
        }
        if let Some(cadence) = &self.reminder_cadence {
            payment.reminder_cadence = cadence.clone();
        }
        if let Some(updated_at) = self.updated_at {
            payment.updated_at = updated_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_day_rejects_out_of_range_values() {
        assert!(AnchorDay::new(0).is_err());
        assert!(AnchorDay::new(32).is_err());
        assert_eq!(AnchorDay::new(31).unwrap().get(), 31);
    }

    #[test]
    fn anchor_day_deserialises_from_bare_integer() {
        let anchor: AnchorDay = serde_json::from_str("15").unwrap();
        assert_eq!(anchor.get(), 15);
        assert!(serde_json::from_str::<AnchorDay>("40").is_err());
    }

    #[test]
    fn recurring_payment_without_anchor_fails_validation() {
        let mut payment = Payment::new("Rent", date(2025, 3, 1));
        payment.is_recurring = true;
        assert!(matches!(
            payment.validate(),
            Err(EngineError::InvalidRecurrenceDay(_))
        ));
    }

    #[test]
    fn negative_amount_fails_validation() {
        let payment = Payment::new("Power", date(2025, 3, 1)).with_amount(-5.0);
        assert!(matches!(
            payment.validate(),
            Err(EngineError::InvalidAmount { field: "amount", .. })
        ));
    }

    #[test]
    fn patch_between_records_only_changed_fields() {
        let before = Payment::new("Phone", date(2025, 3, 10)).with_amount(40.0);
        let mut after = before.clone();
        after.status = PaymentStatus::Paid;

        let patch = PaymentPatch::between(&before, &after);
        assert_eq!(patch.status, Some(PaymentStatus::Paid));
        assert!(patch.due_date.is_none());
        assert!(patch.amount.is_none());

        let mut target = before.clone();
        patch.apply_to(&mut target);
        assert_eq!(target, after);
    }

    #[test]
    fn payment_json_uses_default_cadence_and_category_when_absent() {
        let json = r#"{
            "id": "7f1d0a4e-8b5c-4a43-9f57-3f3a3c7a0b11",
            "name": "Water",
            "due_date": "2025-04-02",
            "updated_at": "2025-03-01T00:00:00Z"
        }"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.reminder_cadence, DEFAULT_CADENCE);
        assert_eq!(payment.category_tag, DEFAULT_CATEGORY);
        assert_eq!(payment.status, PaymentStatus::Upcoming);
    }
}
