//! Adapter implementations of the submission ports.

pub mod memory;

pub use memory::{
    FixedEpochSource, RecordedSubmission, RecordingArchiver, RecordingTransport, WatchEpochSource,
};
