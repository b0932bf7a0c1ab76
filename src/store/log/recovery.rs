//! Log recovery
//!
//! Replays the operation log on open and cuts off a damaged tail.

use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::Result;

use super::LogEntry;

/// Result of a recovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Number of entries successfully recovered
    pub entries_recovered: u64,

    /// Last valid LSN (0 if none)
    pub last_lsn: u64,

    /// Whether the log was truncated (partial or corrupt tail removed)
    pub was_truncated: bool,

    /// Bytes removed from the end of the log
    pub bytes_discarded: u64,
}

/// Read all valid entries from a log file
///
/// Reading stops at the first partial or corrupt frame; everything from there on is
/// dropped. With `truncate` set the file is cut back to the last valid frame so new
/// appends follow good data.
pub fn recover(path: &Path, truncate: bool) -> Result<(Vec<LogEntry>, RecoveryReport)> {
    let bytes = fs::read(path)?;
    let mut entries = Vec::new();
    let mut report = RecoveryReport::default();
    let mut offset = 0usize;

    while offset < bytes.len() {
        match LogEntry::deserialize(&bytes[offset..]) {
            Ok(Some((entry, frame_len))) => {
                report.last_lsn = entry.lsn;
                report.entries_recovered += 1;
                entries.push(entry);
                offset += frame_len;
            }
            Ok(None) => {
                tracing::warn!(offset, "partial frame at end of log");
                break;
            }
            Err(e) => {
                tracing::warn!(offset, error = %e, "corrupt frame in log");
                break;
            }
        }
    }

    if offset < bytes.len() {
        report.bytes_discarded = (bytes.len() - offset) as u64;
        if truncate {
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(offset as u64)?;
            file.sync_all()?;
            report.was_truncated = true;
        }
    }

    Ok((entries, report))
}

/// Inspect a log file without modifying it
pub fn verify(path: &Path) -> Result<RecoveryReport> {
    recover(path, false).map(|(_, report)| report)
}
