//! Slot codec
//!
//! Encodes header and entry records into one fixed-size slot buffer and
//! back. Position 0 always decodes as a header, every other position as an
//! entry.

use crate::error::{Result, StoreError};

use super::{Entry, Header, Key, SlotIndex, KEY_WIDTH, NIL, SLOT_SIZE};

/// Raw bytes of one slot
pub type SlotBuf = [u8; SLOT_SIZE];

/// Either shape a slot can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Header(Header),
    Entry(Entry),
}

impl Slot {
    /// Encode to a zero-padded slot buffer
    pub fn encode(&self) -> SlotBuf {
        match self {
            Slot::Header(header) => encode_header(header),
            Slot::Entry(entry) => encode_entry(entry),
        }
    }

    /// Decode a slot read from `position`
    pub fn decode(position: SlotIndex, buf: &SlotBuf) -> Result<Self> {
        if position == 0 {
            decode_header(buf).map(Slot::Header)
        } else {
            decode_entry(buf).map(Slot::Entry)
        }
    }
}

// =============================================================================
// Header
// =============================================================================

/// Encode a header: count (4) + head (4) + free (4) + padding
pub fn encode_header(header: &Header) -> SlotBuf {
    let mut buf = [0u8; SLOT_SIZE];
    buf[0..4].copy_from_slice(&(header.count as i32).to_ne_bytes());
    buf[4..8].copy_from_slice(&encode_link(header.head).to_ne_bytes());
    buf[8..12].copy_from_slice(&encode_link(header.free).to_ne_bytes());
    buf
}

pub fn decode_header(buf: &SlotBuf) -> Result<Header> {
    let count = read_i32(buf, 0);
    if count < 0 {
        return Err(StoreError::Corrupt(format!("negative record count {}", count)));
    }
    Ok(Header {
        count: count as SlotIndex,
        head: decode_link(read_i32(buf, 4))?,
        free: decode_link(read_i32(buf, 8))?,
    })
}

// =============================================================================
// Entry
// =============================================================================

/// Encode an entry: id (4) + next (4) + key (21) + padding
pub fn encode_entry(entry: &Entry) -> SlotBuf {
    let mut buf = [0u8; SLOT_SIZE];
    buf[0..4].copy_from_slice(&(entry.id as i32).to_ne_bytes());
    buf[4..8].copy_from_slice(&encode_link(entry.next).to_ne_bytes());
    buf[8..8 + KEY_WIDTH].copy_from_slice(entry.key.as_field());
    buf
}

pub fn decode_entry(buf: &SlotBuf) -> Result<Entry> {
    let id = read_i32(buf, 0);
    if id < 1 {
        return Err(StoreError::Corrupt(format!("entry id {} is not an entry slot", id)));
    }

    let mut field = [0u8; KEY_WIDTH];
    field.copy_from_slice(&buf[8..8 + KEY_WIDTH]);

    Ok(Entry {
        id: id as SlotIndex,
        next: decode_link(read_i32(buf, 4))?,
        key: Key::decode(&field)?,
    })
}

// =============================================================================
// Links
// =============================================================================

fn encode_link(link: Option<SlotIndex>) -> i32 {
    match link {
        Some(position) => position as i32,
        None => NIL,
    }
}

/// -1 is "none"; 0 (the header) and other negatives are never valid targets
fn decode_link(raw: i32) -> Result<Option<SlotIndex>> {
    match raw {
        NIL => Ok(None),
        n if n >= 1 => Ok(Some(n as SlotIndex)),
        n => Err(StoreError::Corrupt(format!("invalid slot link {}", n))),
    }
}

fn read_i32(buf: &SlotBuf, at: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[at..at + 4]);
    i32::from_ne_bytes(raw)
}
