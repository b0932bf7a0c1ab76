//! Table composer
//!
//! A table is a plain concatenation of segments. Its segment count and its i-th segment
//! are found by walking segment lengths from the table's start; skipped bodies are never
//! read or copied.
//!
//! Two families of accessors exist:
//! - `find_*` return `Ok(None)` when the index is past the last segment
//! - `get_*` collapse that absence into an empty body, so field access is total

use std::ops::Range;

use bytes::{Bytes, BytesMut};

use crate::error::{Result, SegError};

use super::length::segment_len;
use super::primitive;
use super::segment::{encode_segment, encode_segment_into, segment_body_range, segment_total_length};

// =============================================================================
// Composition
// =============================================================================

/// Concatenate pre-encoded segments in order (zero segments is the empty table)
pub fn join<I, S>(segments: I) -> Vec<u8>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    segments.into_iter().fold(Vec::new(), |mut table, segment| {
        table.extend_from_slice(segment.as_ref());
        table
    })
}

/// Append the segment encoding of `body` to `table`
pub fn append_segment(table: &mut Vec<u8>, body: &[u8]) {
    table.reserve(segment_len(body.len()));
    encode_segment_into(table, body);
}

/// Join pre-encoded segments and wrap the resulting table as a single segment
pub fn wrap_table<I, S>(segments: I) -> Vec<u8>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    encode_segment(&join(segments))
}

// =============================================================================
// Counting
// =============================================================================

/// Count the segments of a table
pub fn count_segments(table: &[u8]) -> Result<usize> {
    count_segments_from(table, 0)
}

/// Count the segments from `start` to the end of `data`
///
/// A last segment whose declared size runs past the end of `data` is `Truncated`.
pub fn count_segments_from(data: &[u8], start: usize) -> Result<usize> {
    let mut offset = start;
    let mut count = 0;

    while offset < data.len() {
        let step = segment_total_length(data, offset)?;
        if offset + step > data.len() {
            return Err(SegError::Truncated {
                offset,
                needed: step,
                available: data.len() - offset,
            });
        }
        offset += step;
        count += 1;
    }

    Ok(count)
}

/// Count the segments of the table carried in the body of the segment at `offset`
pub fn count_segments_in_segment(data: &[u8], offset: usize) -> Result<usize> {
    match segment_body_range(data, offset)? {
        Some(range) => count_segments(&data[range]),
        None => Ok(0),
    }
}

// =============================================================================
// Random Access
// =============================================================================

/// Offset of the `index`-th segment of the table starting at `start`
///
/// Returns `Ok(None)` if the walk runs past the end of `data` first.
fn seek(data: &[u8], start: usize, index: usize) -> Result<Option<usize>> {
    let mut offset = start;

    for _ in 0..index {
        if offset >= data.len() {
            return Ok(None);
        }
        offset += segment_total_length(data, offset)?;
        if offset > data.len() {
            return Ok(None);
        }
    }

    tracing::trace!(index, offset, "seeked to segment");
    Ok(Some(offset))
}

/// Absolute body range of the `index`-th segment of the table starting at `start`
fn locate(data: &[u8], start: usize, index: usize) -> Result<Option<Range<usize>>> {
    match seek(data, start, index)? {
        Some(offset) => segment_body_range(data, offset),
        None => Ok(None),
    }
}

/// Body of the `index`-th segment of a table, or `None` past the last segment
pub fn find_segment_by_index(table: &[u8], index: usize) -> Result<Option<&[u8]>> {
    find_segment_by_index_from(table, 0, index)
}

/// Like [`find_segment_by_index`], for a table starting at `start` within `data`
pub fn find_segment_by_index_from(data: &[u8], start: usize, index: usize) -> Result<Option<&[u8]>> {
    Ok(locate(data, start, index)?.map(|range| &data[range]))
}

/// Body of the `index`-th segment of a table; empty past the last segment
pub fn get_segment_by_index(table: &[u8], index: usize) -> Result<&[u8]> {
    get_segment_by_index_from(table, 0, index)
}

/// Like [`get_segment_by_index`], for a table starting at `start` within `data`
pub fn get_segment_by_index_from(data: &[u8], start: usize, index: usize) -> Result<&[u8]> {
    Ok(find_segment_by_index_from(data, start, index)?.unwrap_or_default())
}

/// Follow a path of indices through nested tables
///
/// Each step reinterprets the previous body as a table. An empty path yields the table
/// itself.
pub fn find_nested<'a>(table: &'a [u8], path: &[usize]) -> Result<Option<&'a [u8]>> {
    let mut current = table;
    for &index in path {
        match find_segment_by_index(current, index)? {
            Some(body) => current = body,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Like [`find_nested`], with absence collapsed to an empty body
pub fn get_nested<'a>(table: &'a [u8], path: &[usize]) -> Result<&'a [u8]> {
    Ok(find_nested(table, path)?.unwrap_or_default())
}

// =============================================================================
// TableView
// =============================================================================

/// A borrowed view of one table inside a larger buffer
///
/// Carries the whole buffer plus the table's offset and length, so nested views share
/// the outer buffer and report absolute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableView<'a> {
    buf: &'a [u8],
    start: usize,
    len: usize,
}

impl<'a> TableView<'a> {
    /// View an entire buffer as a table
    pub fn new(table: &'a [u8]) -> Self {
        Self {
            buf: table,
            start: 0,
            len: table.len(),
        }
    }

    /// View the table at `start..start + len` within `buf`
    pub fn with_bounds(buf: &'a [u8], start: usize, len: usize) -> Result<Self> {
        if start + len > buf.len() {
            return Err(SegError::Truncated {
                offset: start,
                needed: len,
                available: buf.len().saturating_sub(start),
            });
        }
        Ok(Self { buf, start, len })
    }

    /// View the body of a single encoded segment as a table
    pub fn from_segment(segment: &'a [u8]) -> Result<Self> {
        match segment_body_range(segment, 0)? {
            Some(range) => Ok(Self {
                buf: segment,
                start: range.start,
                len: range.len(),
            }),
            None => Ok(Self::new(segment)),
        }
    }

    /// The table's bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.start..self.start + self.len]
    }

    /// Offset of the table within the underlying buffer
    pub fn offset(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments in the table
    pub fn count(&self) -> Result<usize> {
        count_segments(self.as_bytes())
    }

    /// Body of field `index`, or `None` past the last field
    pub fn find(&self, index: usize) -> Result<Option<&'a [u8]>> {
        find_segment_by_index(self.as_bytes(), index)
    }

    /// Body of field `index`; empty past the last field
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        Ok(self.find(index)?.unwrap_or_default())
    }

    /// Body of field `index`; `OutOfRange` past the last field
    pub fn require(&self, index: usize) -> Result<&'a [u8]> {
        match self.find(index)? {
            Some(body) => Ok(body),
            None => Err(SegError::OutOfRange {
                index,
                count: self.count()?,
            }),
        }
    }

    /// The body of field `index` viewed as a nested table
    ///
    /// A missing field yields an empty view positioned at the end of this table.
    pub fn table(&self, index: usize) -> Result<TableView<'a>> {
        match locate(self.as_bytes(), 0, index)? {
            Some(range) => Ok(Self {
                buf: self.buf,
                start: self.start + range.start,
                len: range.len(),
            }),
            None => Ok(Self {
                buf: self.buf,
                start: self.start + self.len,
                len: 0,
            }),
        }
    }

    /// Follow a path of indices through nested tables, returning the final body
    pub fn at_path(&self, path: &[usize]) -> Result<Option<&'a [u8]>> {
        find_nested(self.as_bytes(), path)
    }

    /// Field `index` decoded as an integer
    pub fn int(&self, index: usize) -> Result<i64> {
        primitive::bytes_to_int(self.get(index)?)
    }

    /// Field `index` decoded as a UTF-8 string
    pub fn string(&self, index: usize) -> Result<String> {
        primitive::bytes_to_string(self.get(index)?)
    }

    /// Field `index` decoded as a boolean
    pub fn boolean(&self, index: usize) -> Result<bool> {
        Ok(primitive::bytes_to_bool(self.get(index)?))
    }

    /// Iterate over the bodies of all fields in order
    pub fn iter(&self) -> Segments<'a> {
        Segments {
            data: self.as_bytes(),
            offset: 0,
            failed: false,
        }
    }
}

impl<'a> IntoIterator for TableView<'a> {
    type Item = Result<&'a [u8]>;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the segment bodies of a table
///
/// Yields at most one error, then stops.
pub struct Segments<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match segment_body_range(self.data, self.offset) {
            Ok(Some(range)) => {
                self.offset = range.end;
                Some(Ok(&self.data[range]))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

// =============================================================================
// TableBuilder
// =============================================================================

/// Fluent encoder for tables
///
/// ```
/// use segkv::codec::{TableBuilder, TableView};
///
/// let card = TableBuilder::new()
///     .segment(b"7")
///     .segment_int(1)
///     .segment_int(12)
///     .segment_bool(false)
///     .finish();
///
/// let view = TableView::new(&card);
/// assert_eq!(view.int(2).unwrap(), 12);
/// ```
#[derive(Debug, Default, Clone)]
pub struct TableBuilder {
    buf: BytesMut,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append a raw body as a segment
    pub fn segment(mut self, body: &[u8]) -> Self {
        self.push(body);
        self
    }

    pub fn segment_int(self, value: i64) -> Self {
        self.segment(&primitive::int_to_bytes(value))
    }

    pub fn segment_str(self, value: &str) -> Self {
        self.segment(value.as_bytes())
    }

    pub fn segment_bool(self, value: bool) -> Self {
        self.segment(&primitive::bool_to_bytes(value))
    }

    /// Append another table as one nested segment
    pub fn table(self, inner: TableBuilder) -> Self {
        self.segment(&inner.buf)
    }

    /// Append bytes that are already segment-encoded, without a new prefix
    pub fn raw(mut self, segments: &[u8]) -> Self {
        self.buf.extend_from_slice(segments);
        self
    }

    /// Append a raw body as a segment in place
    pub fn push(&mut self, body: &[u8]) {
        self.buf.reserve(segment_len(body.len()));
        encode_segment_into(&mut self.buf, body);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish encoding and return the table bytes
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
