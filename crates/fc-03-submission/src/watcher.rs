//! The epoch watcher.
//!
//! Observes the external epoch/phase notifier and resets the ceremony
//! state when the epoch advances. The watcher is the external guard for
//! the ResetEpoch precondition: the reducer itself never re-checks epoch
//! equality.

use crate::ports::FlipArchiver;
use fc_02_ceremony_store::{CeremonyEvent, CeremonyStore, Result as StoreResult};
use shared_types::EpochPhase;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Resets per-epoch state when the notifier reports a new epoch.
pub struct EpochWatcher {
    /// The ceremony store receiving ResetEpoch events.
    store: Arc<CeremonyStore>,

    /// Cold storage for the outgoing session's flip content.
    archiver: Arc<dyn FlipArchiver>,
}

impl EpochWatcher {
    /// Create a watcher over the given collaborators.
    pub fn new(store: Arc<CeremonyStore>, archiver: Arc<dyn FlipArchiver>) -> Self {
        Self { store, archiver }
    }

    /// Check one notifier snapshot against the store's epoch.
    ///
    /// On a change: the outgoing epoch's flip content is handed to the
    /// archiver (not awaited), then ResetEpoch is dispatched. Returns
    /// whether a reset was applied.
    pub async fn observe(&self, phase: EpochPhase) -> StoreResult<bool> {
        let current = self.store.epoch();
        if phase.epoch == current {
            return Ok(false);
        }

        info!(
            "[fc-03] Epoch changed: {} -> {}, resetting ceremony state",
            current, phase.epoch
        );

        // Archive before the reset event lands; completion is not awaited.
        let archiver = self.archiver.clone();
        let outgoing = current;
        tokio::spawn(async move {
            if let Err(e) = archiver.archive(outgoing).await {
                warn!("[fc-03] Failed to archive flips for epoch {}: {}", outgoing, e);
            }
        });

        self.store
            .dispatch(CeremonyEvent::ResetEpoch { epoch: phase.epoch })
            .await?;
        Ok(true)
    }

    /// Follow the notifier channel until it closes.
    pub async fn run(self: Arc<Self>, mut phases: watch::Receiver<EpochPhase>) {
        info!("[fc-03] Epoch watcher started");
        loop {
            let phase = *phases.borrow_and_update();
            if let Err(e) = self.observe(phase).await {
                warn!("[fc-03] Epoch reset failed: {}", e);
            }
            if phases.changed().await.is_err() {
                break;
            }
        }
        info!("[fc-03] Phase notifier closed, epoch watcher stopped");
    }
}
