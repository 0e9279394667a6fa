//! The session schedule: epoch notifier and tick source.
//!
//! The core treats both as external collaborators; this driver produces
//! them from a fixed local schedule. One epoch cycles FlipLottery ->
//! ShortSession -> LongSession -> AfterLongSession, then the epoch number
//! advances.

use crate::config::ScheduleConfig;
use shared_types::{EpochPhase, ValidationPeriod};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

/// Pure schedule arithmetic over elapsed whole seconds.
#[derive(Debug, Clone)]
pub struct SessionSchedule {
    config: ScheduleConfig,
}

impl SessionSchedule {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Total seconds in one epoch cycle.
    pub fn epoch_len_secs(&self) -> u64 {
        self.config.flip_lottery_secs
            + self.config.short_session_secs
            + self.config.long_session_secs
            + self.config.after_long_secs
    }

    /// The notifier snapshot and seconds remaining in the current period
    /// at `elapsed` seconds since schedule start.
    pub fn at(&self, elapsed: u64) -> (EpochPhase, u64) {
        let cycle = self.epoch_len_secs();
        let epoch = self.config.start_epoch + elapsed / cycle;
        let mut offset = elapsed % cycle;

        let periods = [
            (ValidationPeriod::FlipLottery, self.config.flip_lottery_secs),
            (ValidationPeriod::ShortSession, self.config.short_session_secs),
            (ValidationPeriod::LongSession, self.config.long_session_secs),
            (ValidationPeriod::AfterLongSession, self.config.after_long_secs),
        ];

        for (period, len) in periods {
            if offset < len {
                return (
                    EpochPhase {
                        epoch,
                        current_period: period,
                    },
                    len - offset,
                );
            }
            offset -= len;
        }
        unreachable!("offset {offset} exceeds epoch cycle {cycle}");
    }
}

/// Drives the notifier watch channel and the 1 Hz tick channel.
pub struct ScheduleDriver {
    schedule: SessionSchedule,
    phase_tx: watch::Sender<EpochPhase>,
    tick_tx: mpsc::Sender<u64>,
}

impl ScheduleDriver {
    /// Create a driver plus the receivers the subsystems consume.
    pub fn new(config: ScheduleConfig) -> (Self, watch::Receiver<EpochPhase>, mpsc::Receiver<u64>) {
        let schedule = SessionSchedule::new(config);
        let (phase, _) = schedule.at(0);
        let (phase_tx, phase_rx) = watch::channel(phase);
        let (tick_tx, tick_rx) = mpsc::channel(64);
        (
            Self {
                schedule,
                phase_tx,
                tick_tx,
            },
            phase_rx,
            tick_rx,
        )
    }

    /// Tick at 1 Hz forever, publishing phase changes and seconds
    /// remaining. Returns when every receiver is gone.
    pub async fn run(self) {
        info!(
            "Session schedule started: {}s per epoch cycle",
            self.schedule.epoch_len_secs()
        );
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut elapsed: u64 = 0;

        loop {
            interval.tick().await;
            elapsed += 1;
            let (phase, remaining) = self.schedule.at(elapsed);

            if self.phase_tx.send(phase).is_err() && self.tick_tx.is_closed() {
                break;
            }
            if self.tick_tx.send(remaining).await.is_err() && self.phase_tx.is_closed() {
                break;
            }
        }
        warn!("All schedule receivers dropped, schedule driver stopped");
    }
}
