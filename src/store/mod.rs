//! Store Module
//!
//! The key-value store boundary and the write-minimizing adapter built on it.
//!
//! ## Responsibilities
//! - `Store`: the three calls the adapter makes (get / put / delete by key)
//! - `StoreAdapter`: key path composition, no-op write elision, change classification
//! - `MemoryStore`: in-process store, counts mutations
//! - `LogStore`: file-backed append-only store with crash recovery
//!
//! ## Change Classification
//! ```text
//! value empty              → delete(key)         → Delete
//! current == value         → (no mutation)       → Unchanged
//! current absent/empty     → put(key, value)     → Create
//! otherwise                → put(key, value)     → Update
//! ```

mod adapter;
mod memory;
pub mod log;

use std::sync::Arc;

use crate::error::{Result, SegError};

pub use adapter::{key_path, rooted_key_path, StoreAdapter};
pub use log::LogStore;
pub use memory::MemoryStore;

/// A byte-keyed store the adapter writes through
///
/// Implementations use interior mutability so one handle can be shared by reference.
/// Failures are returned to the caller unchanged.
pub trait Store {
    /// The last value written under `key`, or `None`
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key` (removing an absent key is not an error)
    fn delete(&self, key: &[u8]) -> Result<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

/// Outcome of a single write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChangeState {
    /// A value was written where none was stored
    Create = 0,
    /// A different value replaced the stored one
    Update = 1,
    /// An empty value was written, so the key was deleted
    Delete = 2,
    /// The stored value already matched; nothing was written
    Unchanged = 3,
    /// The caller's precondition rejected the write; nothing was written
    Abort = 4,
    /// The write request itself was not valid
    Invalid = 99,
}

impl ChangeState {
    /// Wire code of this state
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the states that issued a put or delete to the store
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            ChangeState::Create | ChangeState::Update | ChangeState::Delete
        )
    }
}

impl TryFrom<u8> for ChangeState {
    type Error = SegError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ChangeState::Create),
            1 => Ok(ChangeState::Update),
            2 => Ok(ChangeState::Delete),
            3 => Ok(ChangeState::Unchanged),
            4 => Ok(ChangeState::Abort),
            99 => Ok(ChangeState::Invalid),
            _ => Err(SegError::InvalidField(format!(
                "unknown change state code: {}",
                code
            ))),
        }
    }
}

impl std::fmt::Display for ChangeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChangeState::Create => "create",
            ChangeState::Update => "update",
            ChangeState::Delete => "delete",
            ChangeState::Unchanged => "unchanged",
            ChangeState::Abort => "abort",
            ChangeState::Invalid => "invalid",
        };
        f.write_str(name)
    }
}
