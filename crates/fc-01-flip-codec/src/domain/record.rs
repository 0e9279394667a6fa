use crate::error::RecordError;

// =============================================================================
// LENGTH-PREFIXED RECORD ENCODING
// =============================================================================
//
// Items are byte strings or lists of items. Single bytes below 0x80 stand
// for themselves; short byte strings carry their length in the prefix
// (0x80 + len); longer payloads carry a minimal big-endian length after a
// marker prefix (0xb7 + width). Lists use the same scheme at 0xc0 / 0xf7.

/// A decoded record item: a byte string or a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordItem {
    /// A raw byte field.
    Bytes(Vec<u8>),
    /// An ordered list of nested items.
    List(Vec<RecordItem>),
}

impl RecordItem {
    /// Convenience constructor for a byte field.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RecordItem::Bytes(data.into())
    }
}

/// Encode a byte slice as a record item.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        vec![data[0]]
    } else if data.len() < 56 {
        let mut result = vec![0x80 + data.len() as u8];
        result.extend_from_slice(data);
        result
    } else {
        let len_bytes = encode_length(data.len());
        let mut result = vec![0xb7 + len_bytes.len() as u8];
        result.extend_from_slice(&len_bytes);
        result.extend_from_slice(data);
        result
    }
}

/// Encode a record item, recursing into lists.
pub fn encode_item(item: &RecordItem) -> Vec<u8> {
    match item {
        RecordItem::Bytes(data) => encode_bytes(data),
        RecordItem::List(items) => {
            let encoded_items: Vec<Vec<u8>> = items.iter().map(encode_item).collect();
            let total_len: usize = encoded_items.iter().map(Vec::len).sum();

            let mut result = Vec::with_capacity(total_len + 9);
            if total_len < 56 {
                result.push(0xc0 + total_len as u8);
            } else {
                let len_bytes = encode_length(total_len);
                result.push(0xf7 + len_bytes.len() as u8);
                result.extend_from_slice(&len_bytes);
            }
            for encoded in encoded_items {
                result.extend(encoded);
            }
            result
        }
    }
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

/// Decode a complete record from `data`.
///
/// The whole input must be consumed: trailing bytes are an error.
pub fn decode_record(data: &[u8]) -> Result<RecordItem, RecordError> {
    let (item, rest) = decode_item(data, 0)?;
    if !rest.is_empty() {
        return Err(RecordError::TrailingBytes { count: rest.len() });
    }
    Ok(item)
}

/// Decode one item from the front of `data`, returning the remainder.
///
/// `offset` is the absolute position of `data` within the original input,
/// carried for error reporting only.
fn decode_item(data: &[u8], offset: usize) -> Result<(RecordItem, &[u8]), RecordError> {
    let (&prefix, rest) = data
        .split_first()
        .ok_or(RecordError::UnexpectedEnd { offset })?;

    match prefix {
        // Single byte standing for itself.
        0x00..=0x7f => Ok((RecordItem::Bytes(vec![prefix]), rest)),

        // Short byte string: length in prefix.
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let (payload, rest) = split_payload(rest, len, offset + 1)?;
            Ok((RecordItem::Bytes(payload.to_vec()), rest))
        }

        // Long byte string: minimal big-endian length after the prefix.
        0xb8..=0xbf => {
            let width = (prefix - 0xb7) as usize;
            let (len, rest) = decode_length(rest, width, offset + 1)?;
            let (payload, rest) = split_payload(rest, len, offset + 1 + width)?;
            Ok((RecordItem::Bytes(payload.to_vec()), rest))
        }

        // Short list: payload length in prefix.
        0xc0..=0xf7 => {
            let len = (prefix - 0xc0) as usize;
            let (payload, rest) = split_payload(rest, len, offset + 1)?;
            let items = decode_list_payload(payload, offset + 1)?;
            Ok((RecordItem::List(items), rest))
        }

        // Long list.
        0xf8..=0xff => {
            let width = (prefix - 0xf7) as usize;
            let (len, rest) = decode_length(rest, width, offset + 1)?;
            let (payload, rest) = split_payload(rest, len, offset + 1 + width)?;
            let items = decode_list_payload(payload, offset + 1 + width)?;
            Ok((RecordItem::List(items), rest))
        }
    }
}

/// Decode the items packed inside a list payload until it is consumed.
fn decode_list_payload(mut payload: &[u8], mut offset: usize) -> Result<Vec<RecordItem>, RecordError> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let before = payload.len();
        let (item, rest) = decode_item(payload, offset)?;
        offset += before - rest.len();
        payload = rest;
        items.push(item);
    }
    Ok(items)
}

/// Read a big-endian length of `width` bytes.
fn decode_length(data: &[u8], width: usize, offset: usize) -> Result<(usize, &[u8]), RecordError> {
    if width > std::mem::size_of::<usize>() {
        return Err(RecordError::LengthOverflow { width });
    }
    if data.len() < width {
        return Err(RecordError::UnexpectedEnd { offset });
    }
    let (len_bytes, rest) = data.split_at(width);
    let mut len: usize = 0;
    for &b in len_bytes {
        len = (len << 8) | b as usize;
    }
    Ok((len, rest))
}

/// Split `len` payload bytes off the front of `data`.
fn split_payload(data: &[u8], len: usize, offset: usize) -> Result<(&[u8], &[u8]), RecordError> {
    if data.len() < len {
        return Err(RecordError::UnexpectedEnd {
            offset: offset + data.len(),
        });
    }
    Ok(data.split_at(len))
}
