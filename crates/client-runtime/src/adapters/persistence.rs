//! File-backed validation persistence.
//!
//! Persists the durable `ValidationState` record to a single bincode file,
//! written atomically via a temp file and rename. Suitable for a
//! single-process client; the store reads it once at startup.

use async_trait::async_trait;
use fc_02_ceremony_store::{CeremonySession, ValidationPersistence, ValidationState};
use parking_lot::RwLock;
use shared_types::{Epoch, PersistenceError, SubmittedAnswer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Durable validation store backed by a single file.
#[derive(Debug)]
pub struct FileValidationStore {
    path: PathBuf,
    record: RwLock<ValidationState>,
}

impl FileValidationStore {
    /// Open the store at `path`, loading any existing record.
    ///
    /// A missing file yields the initial state; an unreadable or
    /// undecodable file is an error rather than silent data loss.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();

        let record = match std::fs::read(&path) {
            Ok(bytes) => {
                let record: ValidationState = bincode::deserialize(&bytes)
                    .map_err(|e| PersistenceError::CorruptSnapshot(e.to_string()))?;
                info!(
                    "Loaded validation snapshot from {} ({} bytes, epoch {})",
                    path.display(),
                    bytes.len(),
                    record.epoch
                );
                record
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No validation snapshot at {}", path.display());
                ValidationState::default()
            }
            Err(e) => return Err(PersistenceError::StorageError(e.to_string())),
        };

        Ok(Self {
            path,
            record: RwLock::new(record),
        })
    }

    fn save(&self, record: &ValidationState) -> Result<(), PersistenceError> {
        let bytes = bincode::serialize(record)
            .map_err(|e| PersistenceError::StorageError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::StorageError(e.to_string()))?;
        }

        // Write atomically via temp file.
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)
            .map_err(|e| PersistenceError::StorageError(e.to_string()))?;
        file.write_all(&bytes)
            .map_err(|e| PersistenceError::StorageError(e.to_string()))?;
        file.sync_all()
            .map_err(|e| PersistenceError::StorageError(e.to_string()))?;

        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| PersistenceError::StorageError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ValidationPersistence for FileValidationStore {
    async fn get_validation(&self) -> Result<ValidationState, PersistenceError> {
        Ok(self.record.read().clone())
    }

    async fn reset_validation(&self, epoch: Epoch) -> Result<(), PersistenceError> {
        let record = ValidationState {
            epoch,
            ..Default::default()
        };
        self.save(&record)?;
        *self.record.write() = record;
        Ok(())
    }

    async fn set_short_answers(
        &self,
        payload: &[SubmittedAnswer],
        epoch: Epoch,
    ) -> Result<(), PersistenceError> {
        let mut record = self.record.read().clone();
        record.epoch = epoch;
        record.short_answers = payload.to_vec();
        record.short_answers_submitted = true;
        record.session = CeremonySession::default();
        self.save(&record)?;
        *self.record.write() = record;
        Ok(())
    }

    async fn set_long_answers(
        &self,
        payload: &[SubmittedAnswer],
        epoch: Epoch,
    ) -> Result<(), PersistenceError> {
        let mut record = self.record.read().clone();
        record.epoch = epoch;
        record.long_answers = payload.to_vec();
        record.long_answers_submitted = true;
        record.session = CeremonySession::default();
        self.save(&record)?;
        *self.record.write() = record;
        Ok(())
    }
}
