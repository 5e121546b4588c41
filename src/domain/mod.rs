//! Pure domain models: payments, their status, recurrence anchor, and the
//! draft/patch shapes exchanged with callers. No I/O lives here.

pub mod common;
pub mod payment;

pub use common::*;
pub use payment::*;
