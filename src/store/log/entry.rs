//! Log entry definitions
//!
//! Defines the structure and framing of individual log entries.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegError};

/// Frame header size: LSN (8) + CRC (4) + Len (4)
pub const HEADER_SIZE: usize = 16;

/// A single entry in the operation log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log Sequence Number - monotonically increasing
    pub lsn: u64,

    /// The operation to replay
    pub operation: LogOperation,
}

/// Operations that can be logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOperation {
    /// Put a key-value pair
    Put { key: Vec<u8>, value: Vec<u8> },

    /// Delete a key
    Delete { key: Vec<u8> },
}

impl LogEntry {
    pub fn new(lsn: u64, operation: LogOperation) -> Self {
        Self { lsn, operation }
    }

    /// Encode as a frame: `lsn (8 LE) | crc32 (4 LE) | len (4 LE) | payload`
    ///
    /// The CRC covers the bincode payload only.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let payload = bincode::serialize(&self.operation)?;
        let payload_len = u32::try_from(payload.len()).map_err(|_| {
            SegError::Serialization(format!("log payload too large: {} bytes", payload.len()))
        })?;
        let crc = crc32fast::hash(&payload);

        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.extend_from_slice(&self.lsn.to_le_bytes());
        frame.extend_from_slice(&crc.to_le_bytes());
        frame.extend_from_slice(&payload_len.to_le_bytes());
        frame.extend_from_slice(&payload);

        Ok(frame)
    }

    /// Decode the frame at the start of `bytes`
    ///
    /// Returns:
    /// - `Ok(Some((entry, frame_len)))`: a complete, valid frame
    /// - `Ok(None)`: `bytes` ends inside the frame (partial write)
    /// - `Err(Corruption)`: CRC mismatch or undecodable payload
    pub fn deserialize(bytes: &[u8]) -> Result<Option<(Self, usize)>> {
        if bytes.len() < HEADER_SIZE {
            return Ok(None);
        }

        let lsn = u64::from_le_bytes(read_array(&bytes[0..8]));
        let crc = u32::from_le_bytes(read_array(&bytes[8..12]));
        let payload_len = u32::from_le_bytes(read_array(&bytes[12..16])) as usize;

        let frame_len = HEADER_SIZE + payload_len;
        if bytes.len() < frame_len {
            return Ok(None);
        }

        let payload = &bytes[HEADER_SIZE..frame_len];
        let actual = crc32fast::hash(payload);
        if actual != crc {
            return Err(SegError::Corruption(format!(
                "CRC mismatch for lsn {}: expected {:08x}, got {:08x}",
                lsn, crc, actual
            )));
        }

        let operation: LogOperation = bincode::deserialize(payload)
            .map_err(|e| SegError::Corruption(format!("undecodable payload at lsn {}: {}", lsn, e)))?;

        Ok(Some((Self { lsn, operation }, frame_len)))
    }
}

fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}
