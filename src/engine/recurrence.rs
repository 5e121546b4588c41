//! Monthly recurrence anchored to a canonical day-of-month.
//!
//! Occurrences are always derived from the stored [`AnchorDay`], never from the
//! previous (possibly clamped) due date, so an anchor of 31 returns to the 31st
//! after passing through a short month.

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use crate::domain::AnchorDay;
use crate::engine::date_math::{clamp_to_month, month_offset};
use crate::errors::Result;

/// First occurrence of `anchor` after `current_due`. A due date that no longer
/// sits on the anchor (the anchor was edited) moves to the anchor's next
/// occurrence, which may still fall in the same month.
pub fn advance_to_next_cycle(current_due: NaiveDate, anchor: AnchorDay) -> Result<NaiveDate> {
    let next = next_occurrence_on_or_after(anchor, current_due)?;
    trace!(%current_due, %anchor, %next, "advanced recurring cycle");
    Ok(next)
}

/// First occurrence of `anchor` strictly after `reference`: this month's when it
/// is still ahead, otherwise next month's. Used to schedule a new series.
pub fn next_occurrence_on_or_after(anchor: AnchorDay, reference: NaiveDate) -> Result<NaiveDate> {
    let this_month = clamp_to_month(reference.year(), reference.month(), anchor)?;
    if this_month > reference {
        return Ok(this_month);
    }
    let (year, month) = month_offset(reference, 1);
    clamp_to_month(year, month, anchor)
}
