//! # fc-02-ceremony-store
//!
//! Ceremony State Store subsystem for the Flip-Ceremony client.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: Authoritative ceremony state for the
//!   current epoch, durable across application restarts.
//! - **Pure Reducer Core**: All transitions go through
//!   `domain::reduce(state, event)`, a total pure function over a closed
//!   event union.
//! - **Serialized Dispatch**: `CeremonyStore` admits one event at a time;
//!   a reduction never dispatches another event.
//!
//! ## Event Flow
//!
//! ```text
//! [Startup] ──LoadValidation──→ [Store]
//! [Fetcher] ──FetchFlips*─────→ [Store] ──decode──→ fc-01-flip-codec
//! [UI]      ──Answer/Nav──────→ [Store]
//! [fc-03]   ──Submit*/Reset───→ [Store] ──persist──→ ValidationPersistence
//! ```
//!
//! Durable writes for Submit*/ResetEpoch happen inside the dispatch path,
//! before the reducer transition, so the submitted flags only flip once a
//! durable record of the answers exists.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod store;

pub use adapters::*;
pub use domain::*;
pub use error::*;
pub use events::*;
pub use ports::*;
pub use store::*;
