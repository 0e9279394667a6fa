//! Port traits for the submission subsystem.

pub mod outbound;

pub use outbound::{AnswerTransport, EpochPhaseSource, FlipArchiver};
