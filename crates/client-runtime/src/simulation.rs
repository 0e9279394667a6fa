//! Simulated content service and participant.
//!
//! Local runs have no validation network: this driver plays the fetcher
//! and the participant. When a timed session opens it fetches a generated
//! flip set into the store and answers every flip; the submission trigger
//! then submits at the session deadline exactly as it would in production.

use fc_01_flip_codec::encode_flip_record;
use fc_02_ceremony_store::{CeremonyEvent, CeremonyStore};
use shared_types::{AnswerOption, Epoch, EpochPhase, FlipContent, FlipHashEntry, ValidationPeriod};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Drives a scripted ceremony through the store's event path.
pub struct SimulatedCeremonyDriver {
    store: Arc<CeremonyStore>,
    flips_per_session: usize,
    flip_cache_path: PathBuf,
}

impl SimulatedCeremonyDriver {
    pub fn new(
        store: Arc<CeremonyStore>,
        flips_per_session: usize,
        flip_cache_path: PathBuf,
    ) -> Self {
        Self {
            store,
            flips_per_session,
            flip_cache_path,
        }
    }

    /// Generate the flip set for one session.
    ///
    /// Deterministic in (epoch, period): restarts within a session
    /// regenerate the same content.
    fn generate_flips(
        &self,
        epoch: Epoch,
        period: ValidationPeriod,
    ) -> (Vec<FlipHashEntry>, Vec<FlipContent>) {
        let tag = match period {
            ValidationPeriod::ShortSession => "short",
            ValidationPeriod::LongSession => "long",
            _ => "idle",
        };

        let mut hashes = Vec::with_capacity(self.flips_per_session);
        let mut contents = Vec::with_capacity(self.flips_per_session);
        for i in 0..self.flips_per_session {
            let hash = format!("epoch{epoch}-{tag}-flip{i}");
            let pics: Vec<Vec<u8>> = (0..4)
                .map(|p| format!("{hash}-pic{p}").into_bytes())
                .collect();
            // One straight order and one rotated by the flip index.
            let straight: Vec<u8> = (0..4u8).collect();
            let rotated: Vec<u8> = (0..4u8).map(|p| (p + 1 + i as u8 % 3) % 4).collect();
            let raw = encode_flip_record(&pics, &[straight, rotated]);

            hashes.push(FlipHashEntry { hash: hash.clone(), ready: true });
            contents.push(FlipContent {
                hash,
                hex: format!("0x{}", hex::encode(raw)),
            });
        }
        (hashes, contents)
    }

    /// Persist raw fetched content so the archiver has something to move
    /// at the epoch boundary.
    fn cache_contents(&self, contents: &[FlipContent]) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.flip_cache_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let bytes = bincode::serialize(contents)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(&self.flip_cache_path, bytes)
        };
        if let Err(e) = write() {
            warn!("Failed to cache flip content: {}", e);
        }
    }

    /// Fetch and answer one session's flips.
    async fn drive_session(&self, phase: EpochPhase) {
        info!(
            "Simulated participant entering {:?} of epoch {}",
            phase.current_period, phase.epoch
        );

        self.store
            .dispatch(CeremonyEvent::StartFetchFlips)
            .await
            .ok();

        let (hashes, contents) = self.generate_flips(phase.epoch, phase.current_period);
        self.cache_contents(&contents);
        if let Err(e) = self
            .store
            .dispatch(CeremonyEvent::FetchFlipsSucceeded { hashes, contents })
            .await
        {
            warn!("Simulated fetch failed to apply: {}", e);
            return;
        }

        for index in 0..self.flips_per_session {
            let option = if index % 2 == 0 {
                AnswerOption::Left
            } else {
                AnswerOption::Right
            };
            let picked = self.store.dispatch(CeremonyEvent::PickFlip { index }).await;
            let answered = self.store.dispatch(CeremonyEvent::AnswerFlip { option }).await;
            if picked.is_err() || answered.is_err() {
                warn!("Simulated answer failed at flip {}", index);
                return;
            }
        }

        let state = self.store.state();
        info!(
            "Simulated participant answered {} flips, can_submit={}",
            state.session.flips.len(),
            state.session.can_submit
        );
    }

    /// Whether this session still needs driving.
    fn needs_driving(&self, phase: EpochPhase) -> bool {
        let state = self.store.state();
        if state.epoch != phase.epoch {
            // The epoch watcher has not caught up yet; wait for the reset.
            return false;
        }
        match phase.current_period {
            ValidationPeriod::ShortSession => {
                !state.short_answers_submitted && state.session.flips.is_empty()
            }
            ValidationPeriod::LongSession => {
                !state.long_answers_submitted && state.session.flips.is_empty()
            }
            _ => false,
        }
    }

    /// Follow the notifier and drive each timed session once.
    pub async fn run(self, mut phases: watch::Receiver<EpochPhase>) {
        info!("Simulated ceremony driver started");
        loop {
            let phase = *phases.borrow_and_update();
            if self.needs_driving(phase) {
                self.drive_session(phase).await;
            }
            if phases.changed().await.is_err() {
                break;
            }
        }
        info!("Phase notifier closed, simulated driver stopped");
    }
}
