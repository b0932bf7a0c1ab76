//! Store adapter
//!
//! Composes multi-part keys and writes through a [`Store`] while eliding writes that
//! would not change anything.

use crate::config::Config;
use crate::error::Result;

use super::{ChangeState, Store};

/// Join key elements with `separator` between them, preserving order
///
/// Zero elements yield an empty key.
pub fn key_path<E: AsRef<[u8]>>(separator: &[u8], elements: &[E]) -> Vec<u8> {
    let mut key = Vec::new();
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            key.extend_from_slice(separator);
        }
        key.extend_from_slice(element.as_ref());
    }
    key
}

/// Prefix every element with `/` (`["c", "1"]` becomes `/c/1`)
///
/// Zero elements yield an empty key.
pub fn rooted_key_path<E: AsRef<[u8]>>(elements: &[E]) -> Vec<u8> {
    let mut key = Vec::new();
    for element in elements {
        key.push(b'/');
        key.extend_from_slice(element.as_ref());
    }
    key
}

/// Write-minimizing adapter over an explicit store handle
pub struct StoreAdapter<S> {
    store: S,
    separator: Vec<u8>,
}

impl<S: Store> StoreAdapter<S> {
    /// Wrap a store, joining key paths with `separator`
    pub fn new(store: S, separator: impl Into<Vec<u8>>) -> Self {
        Self {
            store,
            separator: separator.into(),
        }
    }

    /// Wrap a store using the configured key separator
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(store, config.key_separator.clone()))
    }

    /// Compose a key from path elements using this adapter's separator
    pub fn key_path<E: AsRef<[u8]>>(&self, elements: &[E]) -> Vec<u8> {
        key_path(&self.separator, elements)
    }

    /// Stored bytes at `key`, or empty if absent
    ///
    /// Absence and an explicitly stored empty value are indistinguishable here;
    /// use [`StoreAdapter::find`] to tell them apart.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        Ok(self.store.get(key)?.unwrap_or_default())
    }

    /// Stored bytes at `key`, or `None` if absent
    pub fn find(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.store.get(key)
    }

    /// Write `value` at `key`, skipping the store when nothing would change
    ///
    /// An empty value deletes the key and reports `Delete` whether or not anything
    /// was stored.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<ChangeState> {
        if value.is_empty() {
            self.store.delete(key)?;
            tracing::debug!(key = %String::from_utf8_lossy(key), "deleted");
            return Ok(ChangeState::Delete);
        }

        let current = self.store.get(key)?.unwrap_or_default();
        self.write_changed(key, value, &current)
    }

    /// Like [`StoreAdapter::put`], but only if `allow` accepts the current value
    ///
    /// `allow` sees `None` when nothing is stored. A rejected write returns `Abort`
    /// without touching the store.
    pub fn put_if<F>(&self, key: &[u8], value: &[u8], allow: F) -> Result<ChangeState>
    where
        F: FnOnce(Option<&[u8]>) -> bool,
    {
        let current = self.store.get(key)?;
        if !allow(current.as_deref()) {
            tracing::debug!(key = %String::from_utf8_lossy(key), "write aborted by precondition");
            return Ok(ChangeState::Abort);
        }

        if value.is_empty() {
            self.store.delete(key)?;
            return Ok(ChangeState::Delete);
        }

        self.write_changed(key, value, &current.unwrap_or_default())
    }

    /// Compose a key from `elements` and write `value` there
    pub fn put_path<E: AsRef<[u8]>>(&self, elements: &[E], value: &[u8]) -> Result<ChangeState> {
        self.put(&self.key_path(elements), value)
    }

    /// Compose a key from `elements` and read it (empty if absent)
    pub fn get_path<E: AsRef<[u8]>>(&self, elements: &[E]) -> Result<Vec<u8>> {
        self.get(&self.key_path(elements))
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn separator(&self) -> &[u8] {
        &self.separator
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn write_changed(&self, key: &[u8], value: &[u8], current: &[u8]) -> Result<ChangeState> {
        if current == value {
            tracing::debug!(key = %String::from_utf8_lossy(key), "unchanged, write elided");
            return Ok(ChangeState::Unchanged);
        }

        self.store.put(key, value)?;

        let state = if current.is_empty() {
            ChangeState::Create
        } else {
            ChangeState::Update
        };
        tracing::debug!(key = %String::from_utf8_lossy(key), len = value.len(), %state, "stored");
        Ok(state)
    }
}
