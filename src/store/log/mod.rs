//! Log Store
//!
//! A file-backed [`Store`]: every mutation is appended to one log file, and an in-memory
//! index holds the current value per key.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Entry 1                                 │
//! │ ┌─────────┬─────────┬────────┬────────┐ │
//! │ │ LSN (8) │ CRC (4) │Len (4) │ Data   │ │
//! │ └─────────┴─────────┴────────┴────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Entry 2                                 │
//! │ ┌─────────┬─────────┬────────┬────────┐ │
//! │ │ LSN (8) │ CRC (4) │Len (4) │ Data   │ │
//! │ └─────────┴─────────┴────────┴────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//! `Data` is the bincode encoding of a [`LogOperation`].

mod entry;
mod recovery;

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::config::{Config, SyncStrategy};
use crate::error::{Result, SegError};

use super::Store;

pub use entry::{LogEntry, LogOperation, HEADER_SIZE};
pub use recovery::{recover, verify, RecoveryReport};

/// Appends frames and applies the sync strategy
struct LogWriter {
    file: File,
    next_lsn: u64,
    sync_strategy: SyncStrategy,
    unsynced: usize,
}

impl LogWriter {
    fn open(path: &Path, next_lsn: u64, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            next_lsn,
            sync_strategy,
            unsynced: 0,
        })
    }

    fn append(&mut self, operation: LogOperation) -> Result<u64> {
        let lsn = self.next_lsn;
        let frame = LogEntry::new(lsn, operation).serialize()?;
        self.file.write_all(&frame)?;
        self.next_lsn += 1;
        self.unsynced += 1;

        let due = match self.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNEntries { count } => self.unsynced >= count,
        };
        if due {
            self.sync()?;
        }

        Ok(lsn)
    }

    fn sync(&mut self) -> Result<()> {
        self.file.sync_data()?;
        self.unsynced = 0;
        Ok(())
    }
}

/// File-backed [`Store`] with crash recovery
///
/// ## Concurrency
/// - Writes are serialized by the writer mutex: log first, then index
/// - Reads only take the index read lock
pub struct LogStore {
    /// Path of the log file
    path: PathBuf,

    /// Current value per key
    index: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,

    /// Log appender (exclusive access needed)
    writer: Mutex<LogWriter>,

    /// Largest accepted value
    max_value_size: usize,

    /// What the last open found in the log
    recovery: RecoveryReport,
}

impl LogStore {
    const LOG_FILENAME: &'static str = "store.log";
    const COMPACT_FILENAME: &'static str = "store.log.compact";

    /// Open or create a store in `config.data_dir`
    ///
    /// On startup:
    /// 1. Create the data directory
    /// 2. Replay the log into the index, truncating a damaged tail
    /// 3. Reopen the log for appending
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let path = config.data_dir.join(Self::LOG_FILENAME);
        let mut index = BTreeMap::new();

        let report = if path.exists() {
            let (entries, report) = recover(&path, true)?;
            for entry in entries {
                match entry.operation {
                    LogOperation::Put { key, value } => {
                        index.insert(key, value);
                    }
                    LogOperation::Delete { key } => {
                        index.remove(&key);
                    }
                }
            }
            tracing::info!(
                entries = report.entries_recovered,
                last_lsn = report.last_lsn,
                truncated = report.was_truncated,
                "log store recovered"
            );
            report
        } else {
            RecoveryReport::default()
        };

        let writer = LogWriter::open(&path, report.last_lsn + 1, config.sync_strategy)?;

        Ok(Self {
            path,
            index: RwLock::new(index),
            writer: Mutex::new(writer),
            max_value_size: config.max_value_size,
            recovery: report,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(&config)
    }

    /// Force buffered log data to disk
    pub fn sync(&self) -> Result<()> {
        self.writer.lock().sync()
    }

    /// Rewrite the log so it holds one entry per live key
    pub fn compact(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        let index = self.index.read();

        let compact_path = self.path.with_file_name(Self::COMPACT_FILENAME);
        let mut file = File::create(&compact_path)?;
        let mut lsn = 0;
        for (key, value) in index.iter() {
            lsn += 1;
            let operation = LogOperation::Put {
                key: key.clone(),
                value: value.clone(),
            };
            file.write_all(&LogEntry::new(lsn, operation).serialize()?)?;
        }
        file.sync_all()?;
        drop(file);

        let sync_strategy = writer.sync_strategy;
        fs::rename(&compact_path, &self.path)?;
        *writer = LogWriter::open(&self.path, lsn + 1, sync_strategy)?;

        tracing::info!(live_keys = index.len(), "log store compacted");
        Ok(())
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// LSN of the most recent append (0 if none)
    pub fn last_lsn(&self) -> u64 {
        self.writer.lock().next_lsn - 1
    }

    /// Report from the recovery pass done at open
    pub fn recovery_report(&self) -> &RecoveryReport {
        &self.recovery
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for LogStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.index.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        if value.len() > self.max_value_size {
            return Err(SegError::InvalidArgument(format!(
                "value of {} bytes exceeds limit of {} bytes",
                value.len(),
                self.max_value_size
            )));
        }

        let mut writer = self.writer.lock();
        writer.append(LogOperation::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        })?;
        self.index.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.append(LogOperation::Delete { key: key.to_vec() })?;
        self.index.write().remove(key);
        Ok(())
    }
}
