//! In-memory adapters for unit tests and host wiring.
//!
//! `WatchEpochSource` is the production phase-source adapter: the host
//! pushes notifier snapshots into a watch channel and the trigger reads
//! the latest synchronously. The recording adapters exist for tests.

use crate::ports::{AnswerTransport, EpochPhaseSource, FlipArchiver};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{
    ArchiveError, Epoch, EpochPhase, SubmittedAnswer, TransportError, ValidationPeriod,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{watch, Notify};

/// Phase source backed by a watch channel fed by the host notifier.
pub struct WatchEpochSource {
    rx: watch::Receiver<EpochPhase>,
}

impl WatchEpochSource {
    pub fn new(rx: watch::Receiver<EpochPhase>) -> Self {
        Self { rx }
    }
}

impl EpochPhaseSource for WatchEpochSource {
    fn current(&self) -> EpochPhase {
        *self.rx.borrow()
    }
}

/// Phase source with a settable snapshot, for unit tests.
pub struct FixedEpochSource {
    phase: RwLock<EpochPhase>,
}

impl FixedEpochSource {
    pub fn new(phase: EpochPhase) -> Self {
        Self {
            phase: RwLock::new(phase),
        }
    }

    /// Update the reported snapshot.
    pub fn set(&self, phase: EpochPhase) {
        *self.phase.write() = phase;
    }
}

impl EpochPhaseSource for FixedEpochSource {
    fn current(&self) -> EpochPhase {
        *self.phase.read()
    }
}

/// One delivery captured by `RecordingTransport`.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    /// Which session the payload belongs to.
    pub period: ValidationPeriod,
    /// The delivered payload.
    pub payload: Vec<SubmittedAnswer>,
    /// The reserved protocol parameters as received.
    pub params: (u64, u64),
}

/// Transport that records deliveries instead of sending them.
#[derive(Default)]
pub struct RecordingTransport {
    submissions: Mutex<Vec<RecordedSubmission>>,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery fail, for retry-path tests.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Suspend every delivery for `delay`, for in-flight interleavings.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    /// Deliveries captured so far.
    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().clone()
    }

    async fn deliver(
        &self,
        period: ValidationPeriod,
        payload: &[SubmittedAnswer],
        params: (u64, u64),
    ) -> Result<(), TransportError> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::NetworkError(
                "delivery failure injected".to_string(),
            ));
        }
        self.submissions.lock().push(RecordedSubmission {
            period,
            payload: payload.to_vec(),
            params,
        });
        Ok(())
    }
}

#[async_trait]
impl AnswerTransport for RecordingTransport {
    async fn submit_short_answers(
        &self,
        payload: &[SubmittedAnswer],
        p1: u64,
        p2: u64,
    ) -> Result<(), TransportError> {
        self.deliver(ValidationPeriod::ShortSession, payload, (p1, p2))
            .await
    }

    async fn submit_long_answers(
        &self,
        payload: &[SubmittedAnswer],
        p1: u64,
        p2: u64,
    ) -> Result<(), TransportError> {
        self.deliver(ValidationPeriod::LongSession, payload, (p1, p2))
            .await
    }
}

/// Archiver that records archived epochs, for tests.
#[derive(Default)]
pub struct RecordingArchiver {
    archived: Mutex<Vec<Epoch>>,
    notify: Notify,
}

impl RecordingArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epochs archived so far.
    pub fn archived(&self) -> Vec<Epoch> {
        self.archived.lock().clone()
    }

    /// Wait until at least one archive call has landed.
    pub async fn wait_archived(&self) {
        if !self.archived.lock().is_empty() {
            return;
        }
        self.notify.notified().await;
    }
}

#[async_trait]
impl FlipArchiver for RecordingArchiver {
    async fn archive(&self, epoch: Epoch) -> Result<(), ArchiveError> {
        self.archived.lock().push(epoch);
        // notify_one stores a permit, so a waiter arriving later still wakes.
        self.notify.notify_one();
        Ok(())
    }
}
