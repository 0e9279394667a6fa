//! # Flip-Ceremony Client Runtime
//!
//! Wires the ceremony subsystems to their host-side adapters and runs
//! them as background tasks.
//!
//! ## Architecture
//!
//! ```text
//! [ScheduleDriver] ──EpochPhase──→ [EpochWatcher] ──ResetEpoch──→ [CeremonyStore]
//!        │        ──EpochPhase──→ [SimulatedDriver] ──Fetch/Answer──→   │
//!        └────────seconds left──→ [SubmissionService] ──Submit*────→    │
//!                                         │                             │
//!                                  [AnswerTransport]          [FileValidationStore]
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Open the durable validation snapshot and load it into the store
//! 3. Spawn the epoch watcher, submission trigger, and schedule driver
//! 4. Spawn the simulated content service (local runs)
//! 5. Run until interrupted

pub mod adapters;
pub mod config;
pub mod schedule;
pub mod simulation;

use crate::adapters::{FileFlipArchiver, FileValidationStore, LoggingTransport};
use crate::config::ClientConfig;
use crate::schedule::ScheduleDriver;
use crate::simulation::SimulatedCeremonyDriver;
use anyhow::{Context, Result};
use fc_02_ceremony_store::CeremonyStore;
use fc_03_submission::{EpochWatcher, SubmissionService, WatchEpochSource};
use shared_types::EpochPhase;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::info;

/// The assembled ceremony client.
pub struct ClientRuntime {
    config: ClientConfig,
    store: Arc<CeremonyStore>,
    submission: Arc<SubmissionService>,
    watcher: Arc<EpochWatcher>,
    driver: ScheduleDriver,
    phase_rx: watch::Receiver<EpochPhase>,
    tick_rx: mpsc::Receiver<u64>,
}

impl ClientRuntime {
    /// Assemble the client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let persistence = FileValidationStore::open(config.storage.validation_path())
            .context("opening validation snapshot")?;
        let store = Arc::new(CeremonyStore::new(Arc::new(persistence)));

        let (driver, phase_rx, tick_rx) = ScheduleDriver::new(config.schedule.clone());

        let epoch_source = Arc::new(WatchEpochSource::new(phase_rx.clone()));
        let transport = Arc::new(LoggingTransport::new());
        let submission = Arc::new(SubmissionService::new(
            store.clone(),
            transport,
            epoch_source,
        ));

        let archiver = Arc::new(FileFlipArchiver::new(
            config.storage.flip_cache_path(),
            config.storage.archive_dir(),
        ));
        let watcher = Arc::new(EpochWatcher::new(store.clone(), archiver));

        Ok(Self {
            config,
            store,
            submission,
            watcher,
            driver,
            phase_rx,
            tick_rx,
        })
    }

    /// Load persisted state, start every background task, and run until
    /// interrupted.
    pub async fn run(self) -> Result<()> {
        info!("===========================================");
        info!("  Flip-Ceremony Client Runtime v0.1.0");
        info!("===========================================");

        self.store
            .load()
            .await
            .context("loading persisted validation state")?;

        tokio::spawn(self.watcher.clone().run(self.phase_rx.clone()));
        tokio::spawn(self.submission.clone().run(self.tick_rx));
        if self.config.simulation.enabled {
            let sim = SimulatedCeremonyDriver::new(
                self.store.clone(),
                self.config.simulation.flips_per_session,
                self.config.storage.flip_cache_path(),
            );
            tokio::spawn(sim.run(self.phase_rx.clone()));
        }
        tokio::spawn(self.driver.run());

        info!("Client running; press Ctrl-C to stop");
        tokio::signal::ctrl_c()
            .await
            .context("waiting for shutdown signal")?;
        info!("Shutting down");
        Ok(())
    }
}
