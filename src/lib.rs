//! # relstore
//!
//! A single-file record store using a relative (direct-access) organization:
//! - Fixed-size slots addressed by integer position
//! - Entries kept in a sorted singly-linked list through in-record pointers
//! - Deleted slots recycled through an intrusive free list
//! - No separate index, tree or hash structure
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Demo / CLI binaries                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Store                                  │
//! │      insert / delete / contains / list / file dumps          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     SlotFile                                 │
//! │           read_slot / write_slot (pos * SLOT_SIZE)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                ┌──────▼──────┐
//!                │ names.bin   │
//!                │ [H][E][E].. │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::Config;
pub use record::{Entry, Header, Key, SlotIndex};
pub use store::{DeleteOutcome, InsertOutcome, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of relstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
