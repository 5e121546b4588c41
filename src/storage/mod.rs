pub mod memory;

use uuid::Uuid;

use crate::domain::{Payment, PaymentPatch};
use crate::errors::RepositoryError;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Abstraction over the store that owns the payment collection. The engine
/// never calls it; services wire engine results into it.
pub trait PaymentRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Payment>>;
    fn create(&self, payment: Payment) -> Result<Uuid>;
    /// Applies `patch` to the stored record and returns the updated record.
    fn update(&self, id: Uuid, patch: &PaymentPatch) -> Result<Payment>;
    fn delete(&self, id: Uuid) -> Result<Payment>;

    fn get(&self, id: Uuid) -> Result<Payment> {
        self.list()?
            .into_iter()
            .find(|payment| payment.id == id)
            .ok_or(RepositoryError::NotFound(id))
    }
}

/// Change notification published after a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryEvent {
    Created(Payment),
    Updated(Payment),
    Deleted(Uuid),
}

pub use memory::InMemoryPaymentRepository;
