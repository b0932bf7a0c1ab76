//! Configuration for segkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, SegError};

/// Main configuration for a segkv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the file-backed store
    /// Internal structure:
    ///   {data_dir}/
    ///     └── store.log        (append-only operation log)
    pub data_dir: PathBuf,

    /// Sync strategy: how often to fsync the operation log
    pub sync_strategy: SyncStrategy,

    /// Largest value the file-backed store accepts (in bytes)
    pub max_value_size: usize,

    // -------------------------------------------------------------------------
    // Key Configuration
    // -------------------------------------------------------------------------
    /// Separator placed between key path elements
    pub key_separator: Vec<u8>,
}

/// Log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every write (safest, slowest)
    EveryWrite,

    /// fsync after N unsynced entries (balanced durability/performance)
    EveryNEntries { count: usize },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./segkv_data"),
            sync_strategy: SyncStrategy::EveryNEntries { count: 100 },
            max_value_size: 16 * 1024 * 1024, // 16 MB
            key_separator: b"/".to_vec(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings that would otherwise fail later in confusing ways
    pub fn validate(&self) -> Result<()> {
        if self.key_separator.is_empty() {
            return Err(SegError::Config("key separator must not be empty".to_string()));
        }
        if let SyncStrategy::EveryNEntries { count: 0 } = self.sync_strategy {
            return Err(SegError::Config(
                "EveryNEntries sync count must be at least 1".to_string(),
            ));
        }
        if self.max_value_size == 0 {
            return Err(SegError::Config("max value size must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for the log store)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the log sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the largest accepted value size (in bytes)
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.config.max_value_size = size;
        self
    }

    /// Set the key path separator
    pub fn key_separator(mut self, separator: impl Into<Vec<u8>>) -> Self {
        self.config.key_separator = separator.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
