//! Error types for the flip codec subsystem

use thiserror::Error;

/// Errors from decoding the length-prefixed record encoding itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Input ended before the announced length was consumed.
    #[error("Unexpected end of record at offset {offset}")]
    UnexpectedEnd {
        /// Byte offset where more input was required.
        offset: usize,
    },

    /// Bytes remained after the top-level item was fully decoded.
    #[error("Trailing bytes after record: {count}")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        count: usize,
    },

    /// A length-of-length field exceeded the platform word size.
    #[error("Record length overflow: {width} length bytes")]
    LengthOverflow {
        /// Width of the length field in bytes.
        width: usize,
    },
}

/// Errors from interpreting a decoded record as flip content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlipDecodeError {
    /// Content hex string could not be parsed.
    #[error("Invalid content hex: {0}")]
    InvalidHex(String),

    /// The underlying record encoding was malformed.
    #[error("Malformed record: {0}")]
    Record(#[from] RecordError),

    /// The top-level item was not a field list.
    #[error("Flip record is not a field list")]
    NotARecord,

    /// The record did not carry exactly two top-level fields.
    #[error("Flip record has {count} fields, expected 2")]
    WrongFieldCount {
        /// Number of top-level fields found.
        count: usize,
    },

    /// A byte field was found where a nested list was required.
    #[error("Expected a list field")]
    ExpectedList,

    /// A nested list was found where a byte field was required.
    #[error("Expected a byte field")]
    ExpectedBytes,

    /// An order element was wider than one byte.
    #[error("Order element is {len} bytes, expected 0 or 1")]
    OrderValueTooWide {
        /// Width of the offending element.
        len: usize,
    },
}
