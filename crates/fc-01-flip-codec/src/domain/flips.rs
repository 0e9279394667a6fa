//! Flip payload decoding on top of the record encoding.
//!
//! A flip record carries exactly two top-level fields:
//!
//! - field 0: the ordered image-reference list, returned verbatim;
//! - field 1: a list of permutation-order lists, where each order element
//!   is a length-1-or-0 byte field read as an unsigned integer (an empty
//!   byte field maps to 0).

use crate::domain::record::{decode_record, encode_item, RecordItem};
use crate::error::FlipDecodeError;
use shared_types::{Flip, FlipContent, FlipHashEntry};
use tracing::warn;

/// Structured content of one decoded flip record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipPayload {
    /// Ordered image references, verbatim.
    pub pics: Vec<Vec<u8>>,
    /// Ordered permutation-order sequences.
    pub orders: Vec<Vec<u8>>,
}

/// Parse a hex content string, tolerating an optional `0x` prefix.
pub fn parse_content_hex(content: &str) -> Result<Vec<u8>, FlipDecodeError> {
    let stripped = content
        .strip_prefix("0x")
        .or_else(|| content.strip_prefix("0X"))
        .unwrap_or(content);
    hex::decode(stripped).map_err(|e| FlipDecodeError::InvalidHex(e.to_string()))
}

/// Decode one raw flip record into structured content.
///
/// Malformed records propagate as errors; no field is ever substituted
/// with a default.
pub fn decode_flip_payload(raw: &[u8]) -> Result<FlipPayload, FlipDecodeError> {
    let RecordItem::List(fields) = decode_record(raw)? else {
        return Err(FlipDecodeError::NotARecord);
    };
    if fields.len() != 2 {
        return Err(FlipDecodeError::WrongFieldCount {
            count: fields.len(),
        });
    }

    let pics = expect_byte_list(&fields[0])?;

    let RecordItem::List(order_lists) = &fields[1] else {
        return Err(FlipDecodeError::ExpectedList);
    };
    let mut orders = Vec::with_capacity(order_lists.len());
    for order in order_lists {
        let RecordItem::List(elements) = order else {
            return Err(FlipDecodeError::ExpectedList);
        };
        let mut positions = Vec::with_capacity(elements.len());
        for element in elements {
            positions.push(order_value(element)?);
        }
        orders.push(positions);
    }

    Ok(FlipPayload { pics, orders })
}

/// Decode a batch of fetched contents against the requested hash list.
///
/// Output order matches `hashes` order, not `contents` order. Entries with
/// no matching content (first match wins on duplicates) become placeholders
/// with `ready` preserved from the request; entries whose content fails to
/// decode become unready placeholders, without aborting the rest of the
/// batch.
pub fn decode_flip_set(hashes: &[FlipHashEntry], contents: &[FlipContent]) -> Vec<Flip> {
    hashes
        .iter()
        .map(|entry| {
            let Some(content) = contents.iter().find(|c| c.hash == entry.hash) else {
                return Flip::placeholder(entry.hash.clone(), entry.ready);
            };

            match parse_content_hex(&content.hex).and_then(|raw| decode_flip_payload(&raw)) {
                Ok(payload) => Flip {
                    hash: entry.hash.clone(),
                    ready: entry.ready,
                    pics: Some(payload.pics),
                    orders: Some(payload.orders),
                    answer: None,
                },
                Err(e) => {
                    warn!("[fc-01] Failed to decode flip {}: {}", entry.hash, e);
                    Flip::placeholder(entry.hash.clone(), false)
                }
            }
        })
        .collect()
}

/// Encode a flip record the way the content service does.
///
/// Fixture helper for tests and the simulated content service; the client
/// never produces this format for the wire.
pub fn encode_flip_record(pics: &[Vec<u8>], orders: &[Vec<u8>]) -> Vec<u8> {
    let pics_field = RecordItem::List(pics.iter().map(|p| RecordItem::bytes(p.clone())).collect());
    let orders_field = RecordItem::List(
        orders
            .iter()
            .map(|order| {
                RecordItem::List(
                    order
                        .iter()
                        .map(|&v| {
                            if v == 0 {
                                RecordItem::bytes(Vec::new())
                            } else {
                                RecordItem::bytes(vec![v])
                            }
                        })
                        .collect(),
                )
            })
            .collect(),
    );
    encode_item(&RecordItem::List(vec![pics_field, orders_field]))
}

fn expect_byte_list(item: &RecordItem) -> Result<Vec<Vec<u8>>, FlipDecodeError> {
    let RecordItem::List(items) = item else {
        return Err(FlipDecodeError::ExpectedList);
    };
    items
        .iter()
        .map(|item| match item {
            RecordItem::Bytes(data) => Ok(data.clone()),
            RecordItem::List(_) => Err(FlipDecodeError::ExpectedBytes),
        })
        .collect()
}

/// Read a permutation-order element: a 0-or-1 byte unsigned integer.
fn order_value(element: &RecordItem) -> Result<u8, FlipDecodeError> {
    match element {
        RecordItem::Bytes(data) => match data.as_slice() {
            [] => Ok(0),
            [value] => Ok(*value),
            _ => Err(FlipDecodeError::OrderValueTooWide { len: data.len() }),
        },
        RecordItem::List(_) => Err(FlipDecodeError::ExpectedBytes),
    }
}
