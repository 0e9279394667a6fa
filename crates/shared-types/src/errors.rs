//! # Error Types
//!
//! Defines collaborator error types used across subsystems.

use thiserror::Error;

/// Errors from the durable validation persistence collaborator.
///
/// A store with nothing persisted yet is not an error: `get_validation`
/// returns the initial state in that case.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// Underlying storage operation failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Persisted snapshot could not be decoded.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Errors from the answer submission transport collaborator.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network-level failure reaching the submission endpoint.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The endpoint rejected the submission.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Errors from the flip archiver collaborator.
#[derive(Debug, Clone, Error)]
pub enum ArchiveError {
    /// Moving flip content to cold storage failed.
    #[error("Archive error: {0}")]
    IoError(String),
}
