#![doc(test(attr(deny(warnings))))]

//! Bill Reminder computes the payment lifecycle of personal bills: days until
//! due, urgency tiers, monthly recurrence with a canonical anchor day, reminder
//! status projection, the settle-early guardrail, and near-term alerts.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Bill Reminder tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
