//! Host-side adapter implementations of the subsystem ports.

pub mod archiver;
pub mod persistence;
pub mod transport;

pub use archiver::FileFlipArchiver;
pub use persistence::FileValidationStore;
pub use transport::LoggingTransport;
