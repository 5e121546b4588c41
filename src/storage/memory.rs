use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;
use uuid::Uuid;

use super::{PaymentRepository, RepositoryEvent, Result};
use crate::domain::{Identifiable, Payment, PaymentPatch};
use crate::errors::RepositoryError;

/// Process-local repository that keeps insertion order and pushes change
/// events to every live subscriber.
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: Mutex<Vec<Payment>>,
    subscribers: Mutex<Vec<Sender<RepositoryEvent>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with an existing snapshot.
    pub fn with_payments(payments: Vec<Payment>) -> Self {
        Self {
            payments: Mutex::new(payments),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Returns a channel receiving every subsequent change. Dropped receivers are
    /// pruned on the next publish.
    pub fn subscribe(&self) -> Receiver<RepositoryEvent> {
        let (sender, receiver) = mpsc::channel();
        lock(&self.subscribers).push(sender);
        receiver
    }

    pub fn len(&self) -> usize {
        lock(&self.payments).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.payments).is_empty()
    }

    fn publish(&self, event: RepositoryEvent) {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        debug!(subscribers = subscribers.len(), "published repository event");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PaymentRepository for InMemoryPaymentRepository {
    fn list(&self) -> Result<Vec<Payment>> {
        Ok(lock(&self.payments).clone())
    }

    fn create(&self, payment: Payment) -> Result<Uuid> {
        let id = payment.id();
        {
            let mut payments = lock(&self.payments);
            if payments.iter().any(|existing| existing.id == id) {
                return Err(RepositoryError::Duplicate(id));
            }
            payments.push(payment.clone());
        }
        self.publish(RepositoryEvent::Created(payment));
        Ok(id)
    }

    fn update(&self, id: Uuid, patch: &PaymentPatch) -> Result<Payment> {
        let updated = {
            let mut payments = lock(&self.payments);
            let stored = payments
                .iter_mut()
                .find(|payment| payment.id == id)
                .ok_or(RepositoryError::NotFound(id))?;
            patch.apply_to(stored);
            stored.clone()
        };
        self.publish(RepositoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    fn delete(&self, id: Uuid) -> Result<Payment> {
        let removed = {
            let mut payments = lock(&self.payments);
            let index = payments
                .iter()
                .position(|payment| payment.id == id)
                .ok_or(RepositoryError::NotFound(id))?;
            payments.remove(index)
        };
        self.publish(RepositoryEvent::Deleted(id));
        Ok(removed)
    }

    fn get(&self, id: Uuid) -> Result<Payment> {
        lock(&self.payments)
            .iter()
            .find(|payment| payment.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }
}
