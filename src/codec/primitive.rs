//! Primitive conversions
//!
//! Byte forms of the scalar values stored in segment bodies.
//!
//! Integers use the minimal little-endian two's-complement form: zero is the empty
//! sequence, and a positive value whose top byte has its high bit set gains a trailing
//! `0x00` (so 128 is `[0x80, 0x00]`). Length prefixes never go through this path.

use crate::error::{Result, SegError};

/// Widest integer body accepted by [`bytes_to_int`]
pub const MAX_INT_BYTES: usize = 8;

/// Encode an integer in minimal little-endian two's-complement form
pub fn int_to_bytes(value: i64) -> Vec<u8> {
    let bytes = value.to_le_bytes();
    let fill = if value < 0 { 0xFF } else { 0x00 };

    let mut len = bytes.len();
    while len > 0 && bytes[len - 1] == fill {
        // The byte below must still carry the right sign bit once this one is dropped
        let sign_ok = match len {
            1 => value >= 0,
            _ => (bytes[len - 2] & 0x80 != 0) == (value < 0),
        };
        if !sign_ok {
            break;
        }
        len -= 1;
    }

    bytes[..len].to_vec()
}

/// Decode a little-endian two's-complement integer (empty is zero)
pub fn bytes_to_int(data: &[u8]) -> Result<i64> {
    if data.len() > MAX_INT_BYTES {
        return Err(SegError::InvalidField(format!(
            "integer body of {} bytes exceeds {} bytes",
            data.len(),
            MAX_INT_BYTES
        )));
    }

    let negative = data.last().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xFF; MAX_INT_BYTES] } else { [0x00; MAX_INT_BYTES] };
    buf[..data.len()].copy_from_slice(data);

    Ok(i64::from_le_bytes(buf))
}

pub fn str_to_bytes(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Decode a UTF-8 string body
pub fn bytes_to_string(data: &[u8]) -> Result<String> {
    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|e| SegError::InvalidField(format!("string body is not UTF-8: {}", e)))
}

/// Encode a boolean as one byte (`1` or `0`)
pub fn bool_to_bytes(value: bool) -> Vec<u8> {
    vec![value as u8]
}

/// Decode a boolean: empty is false, otherwise the first byte decides
pub fn bytes_to_bool(data: &[u8]) -> bool {
    data.first().is_some_and(|&b| b != 0)
}

pub fn byte_to_bytes(value: u8) -> Vec<u8> {
    vec![value]
}

/// First byte of a body
pub fn bytes_to_byte(data: &[u8]) -> Result<u8> {
    data.first().copied().ok_or(SegError::Truncated {
        offset: 0,
        needed: 1,
        available: 0,
    })
}
