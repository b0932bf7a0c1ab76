//! Segment codec
//!
//! A segment is `prefix ++ body`, where the prefix is the length-codec encoding of
//! `body.len()`. Segments are self-delimiting: their total size is known after reading
//! only the prefix.

use std::ops::Range;

use bytes::BufMut;

use crate::error::{Result, SegError};

use super::length::{decode_length, encode_length_into, segment_len};

/// Encode a body as a segment
pub fn encode_segment(body: &[u8]) -> Vec<u8> {
    let mut segment = Vec::with_capacity(segment_len(body.len()));
    encode_segment_into(&mut segment, body);
    segment
}

/// Append the segment encoding of `body` to a buffer
pub fn encode_segment_into(buf: &mut impl BufMut, body: &[u8]) {
    encode_length_into(buf, body.len());
    buf.put_slice(body);
}

/// Number of prefix bytes of the segment starting at `offset`
pub fn segment_prefix_len(data: &[u8], offset: usize) -> Result<usize> {
    decode_length(data, offset).map(|(_, consumed)| consumed)
}

/// Declared body length of the segment starting at `offset`
pub fn segment_body_len(data: &[u8], offset: usize) -> Result<usize> {
    decode_length(data, offset).map(|(length, _)| length)
}

/// Total size (prefix + body) of the segment starting at `offset`
///
/// Only the prefix is read; the body is neither checked nor touched.
pub fn segment_total_length(data: &[u8], offset: usize) -> Result<usize> {
    decode_length(data, offset).map(|(length, consumed)| consumed + length)
}

/// Absolute byte range of the body of the segment starting at `offset`
///
/// Returns `Ok(None)` when `offset` is at or past the end of `data`.
pub fn segment_body_range(data: &[u8], offset: usize) -> Result<Option<Range<usize>>> {
    if offset >= data.len() {
        return Ok(None);
    }

    let (length, consumed) = decode_length(data, offset)?;
    let body_start = offset + consumed;
    let body_end = body_start + length;

    if body_end > data.len() {
        return Err(SegError::Truncated {
            offset,
            needed: consumed + length,
            available: data.len() - offset,
        });
    }

    Ok(Some(body_start..body_end))
}

/// Decode the segment at `offset`, distinguishing absence from an empty body
///
/// - `Ok(None)`: `offset` is at or past the end of `data` (no segment there)
/// - `Ok(Some(body))`: the segment's body, possibly empty
/// - `Err(_)`: malformed prefix or truncated body
pub fn try_decode_segment(data: &[u8], offset: usize) -> Result<Option<&[u8]>> {
    Ok(segment_body_range(data, offset)?.map(|range| &data[range]))
}

/// Decode the segment at `offset`, treating absence as an empty body
pub fn decode_segment(data: &[u8], offset: usize) -> Result<&[u8]> {
    Ok(try_decode_segment(data, offset)?.unwrap_or_default())
}
