//! File-backed flip archiver.
//!
//! Moves the fetcher's raw flip-content cache into the archive directory
//! when an epoch ends, named after the outgoing epoch.

use async_trait::async_trait;
use fc_03_submission::FlipArchiver;
use shared_types::{ArchiveError, Epoch};
use std::path::PathBuf;
use tracing::{debug, info};

/// Archiver that renames the flip cache file into cold storage.
pub struct FileFlipArchiver {
    /// The live flip-content cache written by the fetcher.
    source: PathBuf,
    /// Destination directory for archived epochs.
    archive_dir: PathBuf,
}

impl FileFlipArchiver {
    pub fn new(source: PathBuf, archive_dir: PathBuf) -> Self {
        Self {
            source,
            archive_dir,
        }
    }
}

#[async_trait]
impl FlipArchiver for FileFlipArchiver {
    async fn archive(&self, epoch: Epoch) -> Result<(), ArchiveError> {
        if !self.source.exists() {
            debug!("No flip cache at {}, nothing to archive", self.source.display());
            return Ok(());
        }

        std::fs::create_dir_all(&self.archive_dir)
            .map_err(|e| ArchiveError::IoError(e.to_string()))?;

        let target = self.archive_dir.join(format!("flips-epoch-{epoch}.bin"));
        std::fs::rename(&self.source, &target)
            .map_err(|e| ArchiveError::IoError(e.to_string()))?;

        info!(
            "Archived epoch {} flip content to {}",
            epoch,
            target.display()
        );
        Ok(())
    }
}
