//! Domain logic: the record encoding and the flip payload built on it.

pub mod flips;
pub mod record;

pub use flips::{
    decode_flip_payload, decode_flip_set, encode_flip_record, parse_content_hex, FlipPayload,
};
pub use record::{decode_record, encode_bytes, encode_item, RecordItem};
