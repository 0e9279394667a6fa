//! # fc-03-submission
//!
//! Submission Trigger subsystem for the Flip-Ceremony client.
//!
//! ## Role in System
//!
//! - **Submission Trigger**: watches the 1 Hz seconds-remaining ticks and
//!   fires exactly one submission per session when the phase is ending and
//!   unsent answers exist.
//! - **Epoch Watcher**: observes the external epoch/phase notifier and
//!   resets the ceremony state when the epoch advances, archiving the
//!   outgoing session's flip content first.
//!
//! ## Safety Property
//!
//! At-most-one-submission-per-flag: the `*_answers_submitted` flag, set
//! synchronously within the store's dispatch path after the durable write,
//! is the sole concurrency guard. It is re-checked after every suspension
//! point. A crash between network success and local dispatch can duplicate
//! the network submission on the next startup; the transport endpoint must
//! tolerate this idempotently.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod service;
pub mod watcher;

pub use adapters::*;
pub use error::*;
pub use ports::*;
pub use service::*;
pub use watcher::*;
