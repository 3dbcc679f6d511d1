//! Record Module
//!
//! Data model of the relative file and the fixed-size slot codec.
//!
//! ## Responsibilities
//! - Header and entry record shapes
//! - Fixed-width, null-padded keys with strcmp-compatible ordering
//! - One codec mapping both shapes onto a uniform slot
//!
//! ## File Format
//! ```text
//! offset = position * SLOT_SIZE (32 bytes)
//!
//! Slot 0 (header)
//! ┌───────────┬──────────┬──────────┬──────────────┐
//! │ count (4) │ head (4) │ free (4) │ zero pad (20)│
//! └───────────┴──────────┴──────────┴──────────────┘
//!
//! Slot k, 1 <= k <= count (entry)
//! ┌────────┬──────────┬────────────────┬─────────┐
//! │ id (4) │ next (4) │ key (21, NUL)  │ pad (3) │
//! └────────┴──────────┴────────────────┴─────────┘
//! ```
//! Integers are i32 in native byte order; -1 encodes "no slot".

mod header;
mod entry;
pub mod codec;

pub use header::Header;
pub use entry::{Entry, Key};
pub use codec::Slot;

/// Position of a slot in the backing file (0 is the header)
pub type SlotIndex = u32;

/// Key field width in bytes, including the NUL terminator
pub const KEY_WIDTH: usize = 21;

/// Longest key that fits in the key field
pub const KEY_CAPACITY: usize = KEY_WIDTH - 1;

/// Size of the header shape: count + head + free
pub const HEADER_SHAPE_SIZE: usize = 12;

/// Size of the entry shape: id + next + key
pub const ENTRY_SHAPE_SIZE: usize = 8 + KEY_WIDTH;

/// Uniform slot size: the larger shape rounded up to 4-byte alignment
pub const SLOT_SIZE: usize = (max(HEADER_SHAPE_SIZE, ENTRY_SHAPE_SIZE) + 3) & !3;

/// On-disk encoding of "no slot"
pub(crate) const NIL: i32 = -1;

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}
