//! Error types for segkv
//!
//! Provides a unified error type for codec and store operations.

use thiserror::Error;

/// Result type alias using SegError
pub type Result<T> = std::result::Result<T, SegError>;

/// Unified error type for segkv operations
#[derive(Debug, Error)]
pub enum SegError {
    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// A run of continuation bytes reached the end of data without a terminal byte
    #[error("Malformed length prefix at offset {offset}: no terminal byte")]
    MalformedLength { offset: usize },

    /// A declared body length extends past the end of data
    #[error("Truncated segment at offset {offset}: needs {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A segment index beyond the number of segments in a table
    #[error("Segment index {index} out of range (table has {count} segments)")]
    OutOfRange { index: usize, count: usize },

    /// A decoded body is not a valid value for the requested type
    #[error("Invalid field: {0}")]
    InvalidField(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log corruption detected: {0}")]
    Corruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store error: {0}")]
    Store(String),

    // -------------------------------------------------------------------------
    // Configuration / Input Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SegError {
    /// True for the codec-level conditions that make a byte stream undecodable
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SegError::MalformedLength { .. } | SegError::Truncated { .. }
        )
    }
}

impl From<bincode::Error> for SegError {
    fn from(err: bincode::Error) -> Self {
        SegError::Serialization(err.to_string())
    }
}
