//! Length codec
//!
//! Encodes a non-negative length as a run of `0xFF` continuation bytes followed by
//! one terminal byte in `0..=254`.

use bytes::BufMut;

use crate::error::{Result, SegError};

/// Continuation marker: adds 255 to the length and keeps reading
pub const CONTINUATION: u8 = 255;

/// Largest value a terminal byte may carry
pub const MAX_TERMINAL: u8 = 254;

const RADIX: usize = CONTINUATION as usize;

/// Number of prefix bytes needed for a body of `body_len` bytes
///
/// Always at least 1, even for an empty body.
pub const fn prefix_len(body_len: usize) -> usize {
    body_len / RADIX + 1
}

/// Total encoded size of a segment carrying `body_len` body bytes
pub const fn segment_len(body_len: usize) -> usize {
    prefix_len(body_len) + body_len
}

/// Encode a length into a buffer
///
/// The terminal byte is written as a single unsigned byte, so a remainder such as
/// 128 is stored as `0x80` and never widened to keep a sign bit clear.
pub fn encode_length_into(buf: &mut impl BufMut, n: usize) {
    buf.put_bytes(CONTINUATION, n / RADIX);
    buf.put_u8((n % RADIX) as u8);
}

/// Encode a length to a freshly allocated prefix
pub fn encode_length(n: usize) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(prefix_len(n));
    encode_length_into(&mut prefix, n);
    prefix
}

/// Decode a length prefix starting at `offset`
///
/// Returns `(length, bytes_consumed)`, where `bytes_consumed` includes the terminal byte.
/// Fails with `MalformedLength` when the data ends before a terminal byte is seen.
pub fn decode_length(data: &[u8], offset: usize) -> Result<(usize, usize)> {
    let mut length = 0usize;
    let mut pos = offset;

    loop {
        match data.get(pos) {
            Some(&CONTINUATION) => {
                length += RADIX;
                pos += 1;
            }
            Some(&terminal) => return Ok((length + terminal as usize, pos - offset + 1)),
            None => return Err(SegError::MalformedLength { offset }),
        }
    }
}
