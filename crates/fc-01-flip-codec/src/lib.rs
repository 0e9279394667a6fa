//! # fc-01-flip-codec
//!
//! Binary Record Decoder subsystem for the Flip-Ceremony client.
//!
//! ## Role in System
//!
//! - Decodes raw hex-encoded flip payloads into structured puzzle content
//!   (an ordered image set plus candidate permutation orders).
//! - Correlates fetched content back to the requested hash list; content
//!   may arrive for a subset or superset of the request, in any order.
//!
//! The record format is a fixed external encoding: this crate decodes it
//! for the ceremony core and carries matching encode helpers for fixtures
//! and tests, but the client never produces it for the wire.
//!
//! ## Error Model
//!
//! A malformed record is a per-flip failure. `decode_flip_payload`
//! propagates it; `decode_flip_set` surfaces it and leaves the affected
//! flip as an unready placeholder without aborting the rest of the batch.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::*;
