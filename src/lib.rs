//! # segkv
//!
//! Compact record serialization with random field access, plus a write-minimizing
//! key-value adapter:
//! - Length-prefixed, self-delimiting segments
//! - Flat tables of segments, addressable by field index (including nested tables)
//! - A store adapter that skips no-op writes and classifies every change
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Record                         │
//! │                 (e.g. card::Card)                            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ field bodies
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Table Composer                             │
//! │        (join / count / get by index / nested paths)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Segment    │          │   Length    │
//!   │  Codec      │─────────▶│   Codec     │
//!   └─────────────┘          └─────────────┘
//!
//!   table bytes ──▶ StoreAdapter ──▶ Store (MemoryStore / LogStore)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;
pub mod card;
pub mod contract;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SegError};
pub use config::Config;
pub use codec::{TableBuilder, TableView};
pub use store::{ChangeState, Store, StoreAdapter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of segkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
