//! Reminder cadences and the display status projected from them.
//!
//! Nothing here delivers a notification. `Sent` and `ReadyToSend` are labels
//! computed from the day count, recomputed on every refresh.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::engine::date_math::shift_date;
use crate::errors::{EngineError, Result};

pub const CADENCE_OFF: &str = "off";
pub const CADENCE_DUE_ONLY: &str = "dueOnly";
pub const CADENCE_ONE_DAY_BEFORE: &str = "oneDayBefore";
pub const CADENCE_THREE_DAYS_BEFORE: &str = "threeDaysBefore";
pub const CADENCE_ONE_WEEK_BEFORE: &str = "oneWeekBefore";

/// Cadence assigned to payments that do not pick one.
pub const DEFAULT_CADENCE: &str = CADENCE_ONE_DAY_BEFORE;

static BUILTIN_CADENCES: Lazy<CadenceTable> = Lazy::new(|| {
    let mut table = CadenceTable::empty();
    table.insert(CADENCE_OFF, Cadence::off("No Reminders"));
    table.insert(CADENCE_DUE_ONLY, Cadence::lead("Due Day Only", 0));
    table.insert(
        CADENCE_ONE_DAY_BEFORE,
        Cadence::lead("1 Day Before + Due Day", 1),
    );
    table.insert(
        CADENCE_THREE_DAYS_BEFORE,
        Cadence::lead("3 Days Before + Due Day", 3),
    );
    table.insert(
        CADENCE_ONE_WEEK_BEFORE,
        Cadence::lead("1 Week Before + Due Day", 7),
    );
    table
});

/// A named reminder policy: remind `lead_days` before the due date, or never.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    pub label: String,
    /// `None` turns reminders off.
    pub lead_days: Option<u32>,
}

impl Cadence {
    pub fn off(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lead_days: None,
        }
    }

    pub fn lead(label: impl Into<String>, lead_days: u32) -> Self {
        Self {
            label: label.into(),
            lead_days: Some(lead_days),
        }
    }

    pub fn is_off(&self) -> bool {
        self.lead_days.is_none()
    }
}

/// Open table of named cadences keyed by cadence name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CadenceTable {
    entries: BTreeMap<String, Cadence>,
}

impl Default for CadenceTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl CadenceTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The five cadences every deployment supports out of the box.
    pub fn builtin() -> &'static CadenceTable {
        &BUILTIN_CADENCES
    }

    /// Adds or replaces a cadence, returning the previous entry.
    pub fn insert(&mut self, name: impl Into<String>, cadence: Cadence) -> Option<Cadence> {
        self.entries.insert(name.into(), cadence)
    }

    pub fn get(&self, name: &str) -> Option<&Cadence> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks up `name`, failing with [`EngineError::UnknownCadence`].
    pub fn resolve(&self, name: &str) -> Result<&Cadence> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownCadence(name.to_string()))
    }

    /// Looks up `name`, falling back to the `fallback` entry when unknown.
    pub fn resolve_or<'a>(&'a self, name: &str, fallback: &str) -> Option<&'a Cadence> {
        self.get(name).or_else(|| self.get(fallback))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cadence)> {
        self.entries.iter().map(|(name, cadence)| (name.as_str(), cadence))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderState {
    Disabled,
    Upcoming,
    ReadyToSend,
    Sent,
}

impl fmt::Display for ReminderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReminderState::Disabled => "Disabled",
            ReminderState::Upcoming => "Upcoming",
            ReminderState::ReadyToSend => "Ready to Send",
            ReminderState::Sent => "Sent",
        };
        f.write_str(label)
    }
}

/// Lead and due-day reminder markers for one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderStatus {
    pub lead: ReminderState,
    pub due: ReminderState,
}

impl ReminderStatus {
    fn both(state: ReminderState) -> Self {
        Self {
            lead: state,
            due: state,
        }
    }
}

/// Projects the reminder markers for a payment `days_until_due` days out.
pub fn compute_reminder_status(days_until_due: i64, cadence: &Cadence) -> ReminderStatus {
    let Some(lead_days) = cadence.lead_days else {
        return ReminderStatus::both(ReminderState::Disabled);
    };
    // An overdue bill cannot have a pending reminder.
    if days_until_due < 0 {
        return ReminderStatus::both(ReminderState::Sent);
    }
    ReminderStatus {
        lead: countdown_state(days_until_due, i64::from(lead_days)),
        due: countdown_state(days_until_due, 0),
    }
}

/// Days count down toward zero, so being below the threshold means it passed.
fn countdown_state(days: i64, threshold: i64) -> ReminderState {
    match days.cmp(&threshold) {
        Ordering::Equal => ReminderState::ReadyToSend,
        Ordering::Less => ReminderState::Sent,
        Ordering::Greater => ReminderState::Upcoming,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    Lead,
    Due,
}

/// A concrete calendar date on which a reminder is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub kind: ReminderKind,
    pub date: NaiveDate,
    pub label: String,
}

/// Calendar dates of the reminders a cadence produces for `due`, lead first.
pub fn reminder_schedule(due: NaiveDate, cadence: &Cadence) -> Result<Vec<ScheduledReminder>> {
    let Some(lead_days) = cadence.lead_days else {
        return Ok(Vec::new());
    };
    let mut reminders = Vec::with_capacity(2);
    if lead_days > 0 {
        let plural = if lead_days > 1 { "s" } else { "" };
        reminders.push(ScheduledReminder {
            kind: ReminderKind::Lead,
            date: shift_date(due, -i64::from(lead_days))?,
            label: format!("Reminder 1 ({lead_days} day{plural} before)"),
        });
    }
    reminders.push(ScheduledReminder {
        kind: ReminderKind::Due,
        date: due,
        label: "Reminder (Due Date)".into(),
    });
    Ok(reminders)
}
