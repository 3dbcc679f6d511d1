//! Ordered scan shared by insert, delete and contains
//!
//! Walks the live list from `head` and stops at the first entry whose key
//! is `>= target`. An equal key would sit exactly there, so the stop
//! position serves both duplicate detection and existence checks.

use crate::error::{Result, StoreError};
use crate::record::{Entry, Header, Key, SlotIndex};

use super::{read_entry, Store};

/// Where a scan for one key came to rest
#[derive(Debug, Clone, Copy)]
pub(super) struct Scan {
    /// Last entry with a key below the target
    pub previous: Option<Entry>,

    /// First entry with a key at or above the target; `None` at list end
    pub stop: Option<Entry>,
}

impl Scan {
    /// The stop entry, when it holds exactly `key`
    pub fn matching(&self, key: &Key) -> Option<Entry> {
        self.stop.filter(|entry| entry.key == *key)
    }
}

impl Store {
    pub(super) fn scan(&mut self, header: &Header, key: &Key) -> Result<Scan> {
        let mut previous = None;
        let mut link = header.head;
        let mut visited: SlotIndex = 0;

        while let Some(position) = link {
            // More steps than allocated slots means a link repeats.
            if visited >= header.count && header.holds(position) {
                return Err(StoreError::Corrupt("live list does not terminate".to_string()));
            }
            visited += 1;

            let entry = read_entry(&mut self.file, header, position)?;
            tracing::trace!(slot = position, key = %entry.key, "scan step");

            if entry.key >= *key {
                return Ok(Scan {
                    previous,
                    stop: Some(entry),
                });
            }
            link = entry.next;
            previous = Some(entry);
        }

        Ok(Scan {
            previous,
            stop: None,
        })
    }
}
