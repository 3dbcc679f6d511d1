//! Error types for relstore
//!
//! Provides a unified error type for all store operations. Duplicate inserts
//! and deletes of missing keys are not errors; they are reported through
//! [`InsertOutcome`](crate::InsertOutcome) and [`DeleteOutcome`](crate::DeleteOutcome).

use thiserror::Error;

use crate::record::SlotIndex;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for relstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Slot Errors
    // -------------------------------------------------------------------------
    /// Read of a slot past the high-water mark
    #[error("Slot {position} is out of range (count = {count})")]
    SlotOutOfRange { position: SlotIndex, count: SlotIndex },

    #[error("Store file corrupted: {0}")]
    Corrupt(String),

    /// Every representable slot index is already allocated
    #[error("Store is full: no slot index left after {0}")]
    Full(SlotIndex),

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
