//! Entry records and their fixed-width keys

use std::fmt;

use crate::error::{Result, StoreError};

use super::{SlotIndex, KEY_CAPACITY, KEY_WIDTH};

/// Fixed-width, null-padded key
///
/// Ordering compares the padded bytes, which matches `strcmp` on the
/// terminated strings: a shorter prefix sorts first because its padding
/// is NUL. Comparison is case-sensitive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    bytes: [u8; KEY_WIDTH],
    len: u8,
}

impl Key {
    /// Build a key from user input
    ///
    /// Rejects empty keys, keys longer than [`KEY_CAPACITY`] bytes and keys
    /// containing NUL, none of which survive the null-padded format.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(StoreError::InvalidKey("key is empty".to_string()));
        }
        if name.len() > KEY_CAPACITY {
            return Err(StoreError::InvalidKey(format!(
                "{:?} is {} bytes, limit is {}",
                name,
                name.len(),
                KEY_CAPACITY
            )));
        }
        if name.as_bytes().contains(&0) {
            return Err(StoreError::InvalidKey(format!("{:?} contains NUL", name)));
        }
        Ok(Self::from_terminated(name.as_bytes()))
    }

    /// Rebuild a key from a raw key field read off disk
    ///
    /// Bytes after the first NUL are ignored.
    pub fn decode(field: &[u8; KEY_WIDTH]) -> Result<Self> {
        let len = field
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| StoreError::Corrupt("key field has no NUL terminator".to_string()))?;
        std::str::from_utf8(&field[..len])
            .map_err(|e| StoreError::Corrupt(format!("key is not UTF-8: {}", e)))?;
        Ok(Self::from_terminated(&field[..len]))
    }

    fn from_terminated(name: &[u8]) -> Self {
        let mut bytes = [0u8; KEY_WIDTH];
        bytes[..name.len()].copy_from_slice(name);
        Self {
            bytes,
            len: name.len() as u8,
        }
    }

    /// The key text, without padding
    pub fn as_str(&self) -> &str {
        // Both constructors only admit valid UTF-8.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// The full padded field as stored on disk
    pub fn as_field(&self) -> &[u8; KEY_WIDTH] {
        &self.bytes
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", self.as_str())
    }
}

impl TryFrom<&str> for Key {
    type Error = StoreError;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

/// A record in slots 1..=count
///
/// While on the free list the key is stale and only `next` matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// This slot's own position
    pub id: SlotIndex,

    /// Next slot in whichever list owns this one
    pub next: Option<SlotIndex>,

    pub key: Key,
}

impl Entry {
    pub fn new(id: SlotIndex, key: Key, next: Option<SlotIndex>) -> Self {
        Self { id, next, key }
    }
}
