//! Adapter implementations of the store's ports.

pub mod memory;

pub use memory::InMemoryValidationStore;
