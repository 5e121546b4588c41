//! Shared traits for payment records.

use uuid::Uuid;

/// Exposes a stable identifier for records held by a repository.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies the tracked amount of an obligation, if any.
pub trait Amounted {
    fn amount(&self) -> Option<f64>;

    /// Amount used in totals; untracked amounts count as zero.
    fn amount_or_zero(&self) -> f64 {
        self.amount().unwrap_or(0.0)
    }
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
