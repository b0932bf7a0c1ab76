//! Codec Module
//!
//! Length-prefixed segment encoding and flat table composition.
//!
//! ## Wire Format
//!
//! ### Length Prefix
//! ```text
//! ┌──────┬──────┬─────┬──────────────┐
//! │ 0xFF │ 0xFF │ ... │ terminal (1) │   n = 255 * (#0xFF) + terminal
//! └──────┴──────┴─────┴──────────────┘
//! ```
//! The terminal byte is always in `0..=254`; `0xFF` only ever means "add 255, keep reading".
//!
//! ### Segment
//! ```text
//! ┌──────────────────┬─────────────────────────────┐
//! │ Prefix (len)     │         Body                │
//! └──────────────────┴─────────────────────────────┘
//! ```
//!
//! ### Table
//! ```text
//! ┌────────────┬────────────┬─────┬────────────┐
//! │ Segment 0  │ Segment 1  │ ... │ Segment N  │   (no outer framing)
//! └────────────┴────────────┴─────┴────────────┘
//! ```
//! A segment body may itself be a table, which gives nested records that can be
//! addressed by a path of indices without decoding sibling fields.
//!
//! There is no magic number, version byte, or type tag: field count and field types
//! are known to the caller.

mod length;
mod segment;
mod table;
pub mod primitive;

pub use length::{
    decode_length, encode_length, encode_length_into, prefix_len, segment_len, CONTINUATION,
    MAX_TERMINAL,
};
pub use segment::{
    decode_segment, encode_segment, encode_segment_into, segment_body_len, segment_body_range,
    segment_prefix_len, segment_total_length, try_decode_segment,
};
pub use table::{
    append_segment, count_segments, count_segments_from, count_segments_in_segment,
    find_nested, find_segment_by_index, find_segment_by_index_from, get_nested,
    get_segment_by_index, get_segment_by_index_from, join, wrap_table, Segments, TableBuilder,
    TableView,
};
