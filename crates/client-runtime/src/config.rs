//! # Client Configuration
//!
//! Unified configuration for the ceremony client runtime.

use fc_03_submission::SUBMIT_AT_SECONDS_LEFT;
use std::path::PathBuf;

/// Complete client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Session schedule configuration.
    pub schedule: ScheduleConfig,
    /// Local simulation configuration.
    pub simulation: SimulationConfig,
}

impl ClientConfig {
    /// Validate the configuration before startup.
    ///
    /// # Returns
    ///
    /// Returns `Err` if either timed session is too short for the
    /// submission trigger to ever fire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_secs = SUBMIT_AT_SECONDS_LEFT + 1;
        if self.schedule.short_session_secs < min_secs {
            return Err(ConfigError::SessionTooShort {
                session: "short",
                secs: self.schedule.short_session_secs,
            });
        }
        if self.schedule.long_session_secs < min_secs {
            return Err(ConfigError::SessionTooShort {
                session: "long",
                secs: self.schedule.long_session_secs,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A timed session ends before the trigger point.
    SessionTooShort {
        /// Which session is misconfigured.
        session: &'static str,
        /// Configured duration in seconds.
        secs: u64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::SessionTooShort { session, secs } => {
                write!(
                    f,
                    "{session} session of {secs}s ends before the submission \
                     trigger can fire (needs at least {}s)",
                    SUBMIT_AT_SECONDS_LEFT + 1
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory for the validation snapshot and flip cache.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Path of the durable validation snapshot.
    pub fn validation_path(&self) -> PathBuf {
        self.data_dir.join("validation.bin")
    }

    /// Path of the raw flip-content cache written by the fetcher.
    pub fn flip_cache_path(&self) -> PathBuf {
        self.data_dir.join("flips.bin")
    }

    /// Directory the archiver moves outgoing flip content into.
    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir.join("archive")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Session schedule configuration.
///
/// One epoch cycles FlipLottery -> ShortSession -> LongSession ->
/// AfterLongSession, then the epoch number advances.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// First epoch number reported by the notifier.
    pub start_epoch: u64,
    /// Flip lottery duration in seconds.
    pub flip_lottery_secs: u64,
    /// Short session duration in seconds.
    pub short_session_secs: u64,
    /// Long session duration in seconds.
    pub long_session_secs: u64,
    /// Post-ceremony duration in seconds.
    pub after_long_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_epoch: 1,
            flip_lottery_secs: 5,
            short_session_secs: 20,
            long_session_secs: 30,
            after_long_secs: 10,
        }
    }
}

/// Local simulation configuration.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Whether the simulated content service and participant run.
    pub enabled: bool,
    /// Flips generated per session.
    pub flips_per_session: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            flips_per_session: 4,
        }
    }
}
