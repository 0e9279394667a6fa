//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the submission subsystem requires the host application to
//! implement.

use async_trait::async_trait;
use shared_types::{ArchiveError, Epoch, EpochPhase, SubmittedAnswer, TransportError};

/// Port: deliver answer payloads to the validation endpoint.
///
/// The two trailing numeric parameters are reserved protocol fields with
/// no meaning in this client; observed callers always send zero. Delivery
/// is at-least-once across restarts, so the endpoint must treat repeated
/// submissions for the same session idempotently.
#[async_trait]
pub trait AnswerTransport: Send + Sync {
    /// Submit the short-session payload.
    async fn submit_short_answers(
        &self,
        payload: &[SubmittedAnswer],
        p1: u64,
        p2: u64,
    ) -> Result<(), TransportError>;

    /// Submit the long-session payload.
    async fn submit_long_answers(
        &self,
        payload: &[SubmittedAnswer],
        p1: u64,
        p2: u64,
    ) -> Result<(), TransportError>;
}

/// Port: the externally-reported epoch and ceremony phase.
///
/// Readable synchronously at any time; changes are pushed by the host via
/// a watch channel, never polled on a fixed schedule by the core.
pub trait EpochPhaseSource: Send + Sync {
    /// The notifier's latest snapshot.
    fn current(&self) -> EpochPhase;
}

/// Port: move the outgoing session's flip content to cold storage.
///
/// Invoked once per detected epoch change, before the reset event is
/// applied. The core does not wait for completion.
#[async_trait]
pub trait FlipArchiver: Send + Sync {
    /// Archive the flip content belonging to `epoch`.
    async fn archive(&self, epoch: Epoch) -> Result<(), ArchiveError>;
}
