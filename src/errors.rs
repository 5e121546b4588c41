use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Rejections raised by the payment engine. Each one is local to a single
/// operation and leaves the caller's records untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid name: payment name must not be empty")]
    InvalidName,
    #[error("Invalid date: `{0}` is not a calendar date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid amount for {field}: `{value}` must be a finite, non-negative number")]
    InvalidAmount { field: &'static str, value: String },
    #[error("Invalid recurrence day: {0}")]
    InvalidRecurrenceDay(String),
    #[error("Unknown reminder cadence: {0}")]
    UnknownCadence(String),
    #[error(
        "Payment guardrail active: this recurring payment is {days_until_due} days away; \
         recurring payments can only be marked as paid within {window} days of the due date"
    )]
    GuardrailViolation { days_until_due: i64, window: i64 },
}

pub type Result<T> = StdResult<T, EngineError>;

/// Failures surfaced by a payment repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Payment not found: {0}")]
    NotFound(Uuid),
    #[error("Payment already exists: {0}")]
    Duplicate(Uuid),
}

/// Failures while loading or saving the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
