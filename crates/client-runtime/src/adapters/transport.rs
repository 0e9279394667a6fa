//! Logging answer transport.
//!
//! Network delivery belongs to the host deployment; local runs accept
//! every payload and log it. The real endpoint must tolerate repeated
//! submissions for the same session (at-least-once delivery).

use async_trait::async_trait;
use fc_03_submission::AnswerTransport;
use shared_types::{SubmittedAnswer, TransportError};
use tracing::info;

/// Transport that accepts every submission and logs the payload.
#[derive(Default)]
pub struct LoggingTransport;

impl LoggingTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnswerTransport for LoggingTransport {
    async fn submit_short_answers(
        &self,
        payload: &[SubmittedAnswer],
        p1: u64,
        p2: u64,
    ) -> Result<(), TransportError> {
        info!(
            "Accepted short-session payload: {:?} (params {}, {})",
            payload.iter().map(|a| a.answer).collect::<Vec<_>>(),
            p1,
            p2
        );
        Ok(())
    }

    async fn submit_long_answers(
        &self,
        payload: &[SubmittedAnswer],
        p1: u64,
        p2: u64,
    ) -> Result<(), TransportError> {
        info!(
            "Accepted long-session payload: {:?} (params {}, {})",
            payload.iter().map(|a| a.answer).collect::<Vec<_>>(),
            p1,
            p2
        );
        Ok(())
    }
}
