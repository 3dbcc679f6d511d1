//! Storage Module
//!
//! Positional record I/O over the backing file.
//!
//! ## Responsibilities
//! - Treat the file as an array of `SLOT_SIZE`-byte slots
//! - Seek to `position * SLOT_SIZE` from the start or the current offset
//! - Read exactly one slot (guarded against the physical file extent)
//! - Write exactly one slot in place, extending the file when needed

mod slot_file;

pub use slot_file::{SlotFile, Whence};
