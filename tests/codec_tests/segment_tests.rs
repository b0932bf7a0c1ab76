//! Tests for the segment codec
//!
//! These tests verify:
//! - Encoding layout for empty, short and boundary-sized bodies
//! - Absence at end of data vs. a stored empty body
//! - Truncation detection
//! - Round-trip for arbitrary bodies

use proptest::prelude::*;
use segkv::codec::{
    decode_segment, encode_segment, prefix_len, segment_body_len, segment_body_range,
    segment_prefix_len, segment_total_length, try_decode_segment,
};
use segkv::SegError;

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_empty_body() {
    assert_eq!(encode_segment(&[]), vec![0]);
}

#[test]
fn test_encode_short_body() {
    assert_eq!(encode_segment(b"abc"), vec![3, b'a', b'b', b'c']);
}

#[test]
fn test_encode_128_byte_body() {
    let body = vec![0xAB; 128];
    let segment = encode_segment(&body);

    assert_eq!(segment.len(), 129);
    assert_eq!(segment[0], 128);
    assert_eq!(&segment[1..], body.as_slice());
}

#[test]
fn test_encode_255_byte_body() {
    let body = vec![7u8; 255];
    let segment = encode_segment(&body);

    assert_eq!(segment.len(), 257);
    assert_eq!(&segment[..2], &[255, 0]);
    assert_eq!(prefix_len(body.len()), 2);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_round_trip() {
    let segment = encode_segment(b"hello");
    assert_eq!(decode_segment(&segment, 0).unwrap(), b"hello");
}

#[test]
fn test_decode_at_offset() {
    let mut data = vec![0xEE, 0xEE];
    data.extend(encode_segment(b"xy"));

    assert_eq!(decode_segment(&data, 2).unwrap(), b"xy");
}

#[test]
fn test_decode_past_end_is_empty() {
    let segment = encode_segment(b"abc");

    assert_eq!(decode_segment(&segment, segment.len()).unwrap(), b"");
    assert_eq!(decode_segment(&segment, 100).unwrap(), b"");
    assert_eq!(try_decode_segment(&segment, segment.len()).unwrap(), None);
}

#[test]
fn test_stored_empty_is_present_but_empty() {
    let segment = encode_segment(&[]);

    assert_eq!(try_decode_segment(&segment, 0).unwrap(), Some(&[][..]));
    assert_eq!(decode_segment(&segment, 0).unwrap(), b"");
}

#[test]
fn test_decode_truncated_body() {
    let err = decode_segment(&[5, 1, 2], 0).unwrap_err();

    match err {
        SegError::Truncated {
            offset,
            needed,
            available,
        } => {
            assert_eq!(offset, 0);
            assert_eq!(needed, 6);
            assert_eq!(available, 3);
        }
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn test_decode_malformed_prefix() {
    assert!(matches!(
        decode_segment(&[255, 255, 255], 0),
        Err(SegError::MalformedLength { .. })
    ));
}

// =============================================================================
// Size Helpers
// =============================================================================

#[test]
fn test_size_helpers_read_only_prefix() {
    // Body is missing entirely; helpers must still answer from the prefix
    let data = [255, 10];

    assert_eq!(segment_prefix_len(&data, 0).unwrap(), 2);
    assert_eq!(segment_body_len(&data, 0).unwrap(), 265);
    assert_eq!(segment_total_length(&data, 0).unwrap(), 267);
}

#[test]
fn test_body_range() {
    let mut data = encode_segment(b"ab");
    data.extend(encode_segment(b"cde"));

    assert_eq!(segment_body_range(&data, 0).unwrap(), Some(1..3));
    assert_eq!(segment_body_range(&data, 3).unwrap(), Some(4..7));
    assert_eq!(segment_body_range(&data, 7).unwrap(), None);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_segment_round_trip(body in proptest::collection::vec(any::<u8>(), 0..1200)) {
        let segment = encode_segment(&body);
        prop_assert_eq!(segment.len(), prefix_len(body.len()) + body.len());
        prop_assert_eq!(decode_segment(&segment, 0).unwrap(), body.as_slice());
        prop_assert_eq!(segment_total_length(&segment, 0).unwrap(), segment.len());
    }
}
