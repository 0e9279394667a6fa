//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the ceremony store requires the host application to
//! implement.

use crate::domain::ValidationState;
use async_trait::async_trait;
use shared_types::{Epoch, PersistenceError, SubmittedAnswer};

/// Abstract interface for durable validation-state storage.
///
/// Production: `FileValidationStore` (client-runtime/adapters/persistence.rs)
/// Testing: `InMemoryValidationStore` (adapters/memory.rs)
///
/// The stored record is the source of truth read once at startup. Writes
/// must be durable: a submitted flag read back after a restart means the
/// corresponding answers were recorded.
#[async_trait]
pub trait ValidationPersistence: Send + Sync {
    /// Read the persisted validation state.
    ///
    /// Returns the initial state when nothing has been persisted yet.
    async fn get_validation(&self) -> Result<ValidationState, PersistenceError>;

    /// Durably replace the stored state with a cleared record for `epoch`.
    async fn reset_validation(&self, epoch: Epoch) -> Result<(), PersistenceError>;

    /// Durably record submitted short-session answers for `epoch`.
    async fn set_short_answers(
        &self,
        payload: &[SubmittedAnswer],
        epoch: Epoch,
    ) -> Result<(), PersistenceError>;

    /// Durably record submitted long-session answers for `epoch`.
    async fn set_long_answers(
        &self,
        payload: &[SubmittedAnswer],
        epoch: Epoch,
    ) -> Result<(), PersistenceError>;
}
