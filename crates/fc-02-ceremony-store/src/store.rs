//! The ceremony store service.
//!
//! Wraps the pure reducer with serialized dispatch and the durable
//! persistence side effects that must precede the Submit*/ResetEpoch
//! transitions.

use crate::domain::{reduce, ValidationState};
use crate::error::Result;
use crate::events::CeremonyEvent;
use crate::ports::ValidationPersistence;
use parking_lot::RwLock;
use shared_types::Epoch;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Holds the authoritative ceremony state and applies events to it.
///
/// The persistence collaborator is an injected port, never a process
/// global. Events are admitted one at a time through an async gate; a
/// reduction never dispatches another event, so there is no reentrancy.
pub struct CeremonyStore {
    /// Current state. Readers take cheap cloned snapshots.
    state: RwLock<ValidationState>,

    /// Durable storage for submitted answers and the last-seen epoch.
    persistence: Arc<dyn ValidationPersistence>,

    /// Serializes dispatch: one event in flight at a time.
    dispatch_gate: tokio::sync::Mutex<()>,

    /// Events applied since construction.
    events_applied: AtomicU64,
}

impl CeremonyStore {
    /// Create a store with the given persistence port.
    pub fn new(persistence: Arc<dyn ValidationPersistence>) -> Self {
        Self {
            state: RwLock::new(ValidationState::default()),
            persistence,
            dispatch_gate: tokio::sync::Mutex::new(()),
            events_applied: AtomicU64::new(0),
        }
    }

    /// Load the persisted snapshot into the store. Startup only.
    pub async fn load(&self) -> Result<()> {
        let snapshot = self.persistence.get_validation().await?;
        info!(
            "[fc-02] Loaded validation state: epoch={}, short_submitted={}, long_submitted={}",
            snapshot.epoch, snapshot.short_answers_submitted, snapshot.long_answers_submitted
        );
        self.dispatch(CeremonyEvent::LoadValidation(snapshot)).await
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ValidationState {
        self.state.read().clone()
    }

    /// The epoch the current state was computed for.
    pub fn epoch(&self) -> Epoch {
        self.state.read().epoch
    }

    /// Number of events applied since construction.
    pub fn events_applied(&self) -> u64 {
        self.events_applied.load(Ordering::Relaxed)
    }

    /// Apply one event.
    ///
    /// For `SubmitShortAnswers`/`SubmitLongAnswers`/`ResetEpoch` the
    /// durable write happens first; if it fails the event is not applied
    /// and the state is unchanged, so the submitted flags only ever flip
    /// after a durable record exists.
    pub async fn dispatch(&self, event: CeremonyEvent) -> Result<()> {
        let _gate = self.dispatch_gate.lock().await;

        match &event {
            CeremonyEvent::SubmitShortAnswers { answers, epoch } => {
                self.persistence.set_short_answers(answers, *epoch).await?;
                info!(
                    "[fc-02] Short answers persisted: {} records, epoch {}",
                    answers.len(),
                    epoch
                );
            }
            CeremonyEvent::SubmitLongAnswers { answers, epoch } => {
                self.persistence.set_long_answers(answers, *epoch).await?;
                info!(
                    "[fc-02] Long answers persisted: {} records, epoch {}",
                    answers.len(),
                    epoch
                );
            }
            CeremonyEvent::ResetEpoch { epoch } => {
                self.persistence.reset_validation(*epoch).await?;
                info!("[fc-02] Validation reset persisted for epoch {}", epoch);
            }
            _ => {}
        }

        {
            let mut state = self.state.write();
            let next = reduce(state.clone(), event);
            debug!(
                epoch = next.epoch,
                flips = next.session.flips.len(),
                can_submit = next.session.can_submit,
                "[fc-02] Event applied"
            );
            *state = next;
        }
        self.events_applied.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
