//! Tests for primitive conversions
//!
//! These tests verify:
//! - Minimal two's-complement integer bodies
//! - String, boolean and byte bodies
//! - Rejection of bodies that are not valid for their type

use segkv::codec::primitive::{
    bool_to_bytes, byte_to_bytes, bytes_to_bool, bytes_to_byte, bytes_to_int, bytes_to_string,
    int_to_bytes, str_to_bytes,
};
use segkv::SegError;

// =============================================================================
// Integer Tests
// =============================================================================

#[test]
fn test_int_minimal_forms() {
    assert_eq!(int_to_bytes(0), Vec::<u8>::new());
    assert_eq!(int_to_bytes(1), vec![0x01]);
    assert_eq!(int_to_bytes(127), vec![0x7F]);
    assert_eq!(int_to_bytes(128), vec![0x80, 0x00]);
    assert_eq!(int_to_bytes(255), vec![0xFF, 0x00]);
    assert_eq!(int_to_bytes(256), vec![0x00, 0x01]);
    assert_eq!(int_to_bytes(-1), vec![0xFF]);
    assert_eq!(int_to_bytes(-128), vec![0x80]);
    assert_eq!(int_to_bytes(-129), vec![0x7F, 0xFF]);
}

#[test]
fn test_int_round_trip() {
    let values = [
        0,
        1,
        -1,
        127,
        128,
        -128,
        -129,
        65_535,
        i64::from(i32::MAX),
        i64::MAX,
        i64::MIN,
    ];
    for value in values {
        assert_eq!(bytes_to_int(&int_to_bytes(value)).unwrap(), value, "value {}", value);
    }
}

#[test]
fn test_int_empty_is_zero() {
    assert_eq!(bytes_to_int(&[]).unwrap(), 0);
}

#[test]
fn test_int_too_wide() {
    assert!(matches!(
        bytes_to_int(&[0; 9]),
        Err(SegError::InvalidField(_))
    ));
}

// =============================================================================
// String / Bool / Byte Tests
// =============================================================================

#[test]
fn test_string_round_trip() {
    let bytes = str_to_bytes("héllo");
    assert_eq!(bytes_to_string(&bytes).unwrap(), "héllo");
}

#[test]
fn test_string_invalid_utf8() {
    assert!(matches!(
        bytes_to_string(&[0xC3, 0x28]),
        Err(SegError::InvalidField(_))
    ));
}

#[test]
fn test_bool_bodies() {
    assert_eq!(bool_to_bytes(true), vec![1]);
    assert_eq!(bool_to_bytes(false), vec![0]);
    assert!(bytes_to_bool(&[1]));
    assert!(bytes_to_bool(&[7, 0]));
    assert!(!bytes_to_bool(&[0]));
    assert!(!bytes_to_bool(&[]));
}

#[test]
fn test_byte_bodies() {
    assert_eq!(byte_to_bytes(0xAB), vec![0xAB]);
    assert_eq!(bytes_to_byte(&[0xAB, 0x01]).unwrap(), 0xAB);
    assert!(bytes_to_byte(&[]).is_err());
}
