//! Port traits for the ceremony store.

pub mod outbound;

pub use outbound::ValidationPersistence;
