//! In-memory persistence adapter for unit tests.
//!
//! Production uses `FileValidationStore` in client-runtime, which persists
//! the same record to disk with an atomic rename.

use crate::domain::{CeremonySession, ValidationState};
use crate::ports::ValidationPersistence;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Epoch, PersistenceError, SubmittedAnswer};

/// Keeps the durable record in process memory.
#[derive(Default)]
pub struct InMemoryValidationStore {
    record: RwLock<ValidationState>,
    fail_writes: RwLock<bool>,
}

impl InMemoryValidationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a pre-existing record, as if a previous run
    /// had persisted it.
    pub fn with_record(record: ValidationState) -> Self {
        Self {
            record: RwLock::new(record),
            fail_writes: RwLock::new(false),
        }
    }

    /// Make every write fail, for error-path tests.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    /// Current durable record, for assertions.
    pub fn record(&self) -> ValidationState {
        self.record.read().clone()
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if *self.fail_writes.read() {
            return Err(PersistenceError::StorageError(
                "write failure injected".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ValidationPersistence for InMemoryValidationStore {
    async fn get_validation(&self) -> Result<ValidationState, PersistenceError> {
        Ok(self.record.read().clone())
    }

    async fn reset_validation(&self, epoch: Epoch) -> Result<(), PersistenceError> {
        self.check_writable()?;
        *self.record.write() = ValidationState {
            epoch,
            ..Default::default()
        };
        Ok(())
    }

    async fn set_short_answers(
        &self,
        payload: &[SubmittedAnswer],
        epoch: Epoch,
    ) -> Result<(), PersistenceError> {
        self.check_writable()?;
        let mut record = self.record.write();
        record.epoch = epoch;
        record.short_answers = payload.to_vec();
        record.short_answers_submitted = true;
        record.session = CeremonySession::default();
        Ok(())
    }

    async fn set_long_answers(
        &self,
        payload: &[SubmittedAnswer],
        epoch: Epoch,
    ) -> Result<(), PersistenceError> {
        self.check_writable()?;
        let mut record = self.record.write();
        record.epoch = epoch;
        record.long_answers = payload.to_vec();
        record.long_answers_submitted = true;
        record.session = CeremonySession::default();
        Ok(())
    }
}
