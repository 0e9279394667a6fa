//! Error types for the ceremony store subsystem

use shared_types::PersistenceError;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while dispatching ceremony events
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The durable persistence collaborator failed; the event was not
    /// applied and the state is unchanged.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}
