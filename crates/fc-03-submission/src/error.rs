//! Error types for the submission subsystem

use fc_02_ceremony_store::StoreError;
use shared_types::TransportError;
use thiserror::Error;

/// Result type alias for submission operations
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Errors that can occur while triggering a submission
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    /// The transport rejected or failed to deliver the payload. The
    /// submitted flag stays false; the trigger retries on the next
    /// qualifying tick.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The store failed to durably apply the submit event after the
    /// transport call succeeded.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
