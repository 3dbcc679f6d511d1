//! Store Module
//!
//! The relative file store: an ordered set of keys kept in fixed-size slots.
//!
//! ## Responsibilities
//! - Bootstrap a new file or reopen an existing one
//! - Insert keys in sorted position, reusing freed slots first
//! - Delete keys, returning their slots to the free list
//! - Logical (list order) and physical (slot order) traversals
//!
//! ## Slot Lifecycle
//! ```text
//!   never allocated ──insert (count+1)──▶ live list
//!                                           │  ▲
//!                                     delete│  │insert (pop free head)
//!                                           ▼  │
//!                                         free list
//! ```
//! Every mutation reads the header, scans, validates, and only then
//! writes: a Duplicate or NotFound outcome leaves the file untouched.

mod scan;
mod traverse;

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::record::{Entry, Header, Key, Slot, SlotIndex};
use crate::storage::{SlotFile, Whence};

pub use traverse::{FileIter, ListIter};

/// Largest slot index the i32 on-disk format can address
const MAX_SLOT: SlotIndex = i32::MAX as SlotIndex;

/// Result of [`Store::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Key stored in this slot
    Inserted(SlotIndex),

    /// Key already present; nothing written
    Duplicate,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// Result of [`Store::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Key removed; this slot is now the head of the free list
    Deleted(SlotIndex),

    /// Key absent; nothing written
    NotFound,
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted(_))
    }
}

/// Handle to one relative file
///
/// Owns the backing file exclusively; the handle is closed when the store
/// is dropped, on every exit path.
pub struct Store {
    config: Config,
    file: SlotFile,
}

impl Store {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create (or truncate) the backing file and write an empty header
    pub fn create(config: Config) -> Result<Self> {
        config.validate()?;

        let mut file = SlotFile::create(&config.path)?;
        file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start)?;
        if config.sync_writes {
            file.sync()?;
        }

        tracing::info!(path = %config.path.display(), "created store");
        Ok(Self { config, file })
    }

    /// Create a store at `path` with default settings
    pub fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        Self::create(Config::builder().path(path.as_ref()).build())
    }

    /// Reopen an existing store file without truncating it
    ///
    /// The header is checked against the file extent before the store is
    /// handed out.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let mut file = SlotFile::open(&config.path)?;
        if file.extent() == 0 {
            return Err(StoreError::Corrupt("file has no header slot".to_string()));
        }

        let header = read_header(&mut file)?;
        let present = file.extent() - 1;
        if header.count > present {
            return Err(StoreError::Corrupt(format!(
                "header claims {} slots but file holds {}",
                header.count, present
            )));
        }
        for (name, link) in [("head", header.head), ("free", header.free)] {
            if let Some(position) = link {
                if !header.holds(position) {
                    return Err(StoreError::Corrupt(format!(
                        "{} link {} is beyond count {}",
                        name, position, header.count
                    )));
                }
            }
        }

        tracing::info!(
            path = %config.path.display(),
            count = header.count,
            "reopened store"
        );
        Ok(Self { config, file })
    }

    /// Reopen the store at `path` with default settings
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().path(path.as_ref()).build())
    }

    /// Flush and close the backing file
    pub fn close(mut self) -> Result<()> {
        self.file.sync()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert `name` at its sorted position
    ///
    /// The slot comes from the head of the free list when one is available,
    /// otherwise the file grows by one slot.
    pub fn insert(&mut self, name: &str) -> Result<InsertOutcome> {
        let key = Key::new(name)?;
        let mut header = read_header(&mut self.file)?;
        let scan = self.scan(&header, &key)?;

        if scan.matching(&key).is_some() {
            tracing::debug!(key = %key, "duplicate key, not inserted");
            return Ok(InsertOutcome::Duplicate);
        }

        let (id, reused) = match header.free {
            Some(position) => {
                let freed = read_entry(&mut self.file, &header, position)?;
                header.free = freed.next;
                (position, true)
            }
            None => {
                if header.count >= MAX_SLOT {
                    return Err(StoreError::Full(header.count));
                }
                header.count += 1;
                (header.count, false)
            }
        };

        let entry = Entry::new(id, key, scan.stop.map(|stop| stop.id));

        match scan.previous {
            None => header.head = Some(id),
            Some(mut previous) => {
                previous.next = Some(id);
                self.write_entry(&previous)?;
            }
        }
        self.write_header(&header)?;
        self.write_entry(&entry)?;
        self.sync_if_configured()?;

        tracing::debug!(key = %key, slot = id, reused, "inserted");
        Ok(InsertOutcome::Inserted(id))
    }

    /// Remove `name` and push its slot onto the free list
    pub fn delete(&mut self, name: &str) -> Result<DeleteOutcome> {
        let key = Key::new(name)?;
        let mut header = read_header(&mut self.file)?;
        let scan = self.scan(&header, &key)?;

        let Some(mut target) = scan.matching(&key) else {
            tracing::debug!(key = %key, "key not in list, not deleted");
            return Ok(DeleteOutcome::NotFound);
        };

        match scan.previous {
            None => header.head = target.next,
            Some(mut previous) => {
                previous.next = target.next;
                self.write_entry(&previous)?;
            }
        }

        target.next = header.free;
        header.free = Some(target.id);
        self.write_entry(&target)?;
        self.write_header(&header)?;
        self.sync_if_configured()?;

        tracing::debug!(key = %key, slot = target.id, "deleted");
        Ok(DeleteOutcome::Deleted(target.id))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Whether `name` is on the live list
    pub fn contains(&mut self, name: &str) -> Result<bool> {
        let key = Key::new(name)?;
        let header = read_header(&mut self.file)?;
        let scan = self.scan(&header, &key)?;
        Ok(scan.matching(&key).is_some())
    }

    /// Current header, read from disk
    pub fn header(&mut self) -> Result<Header> {
        read_header(&mut self.file)
    }

    /// Number of live entries
    pub fn len(&mut self) -> Result<usize> {
        let mut live = 0;
        for entry in self.list_entries()? {
            entry?;
            live += 1;
        }
        Ok(live)
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.header()?.head.is_none())
    }

    /// Live keys in sorted order
    pub fn keys(&mut self) -> Result<Vec<String>> {
        self.list_entries()?
            .map(|entry| entry.map(|e| e.key.as_str().to_string()))
            .collect()
    }

    /// Slots on the free list, most recently freed first
    pub fn free_slots(&mut self) -> Result<Vec<SlotIndex>> {
        let header = read_header(&mut self.file)?;
        let mut slots = Vec::new();
        let mut link = header.free;

        while let Some(position) = link {
            if slots.len() as SlotIndex >= header.count && header.holds(position) {
                return Err(StoreError::Corrupt("free list does not terminate".to_string()));
            }
            let entry = read_entry(&mut self.file, &header, position)?;
            slots.push(position);
            link = entry.next;
        }
        Ok(slots)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_header(&mut self, header: &Header) -> Result<()> {
        self.file.write_slot(&Slot::Header(*header), 0, Whence::Start)
    }

    fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        self.file.write_slot(&Slot::Entry(*entry), entry.id, Whence::Start)
    }

    fn sync_if_configured(&mut self) -> Result<()> {
        if self.config.sync_writes {
            self.file.sync()?;
        }
        Ok(())
    }
}

/// Read slot 0
pub(crate) fn read_header(file: &mut SlotFile) -> Result<Header> {
    match file.read_slot(0, Whence::Start)? {
        Slot::Header(header) => Ok(header),
        Slot::Entry(_) => Err(StoreError::Corrupt("slot 0 is not a header".to_string())),
    }
}

/// Read an allocated entry slot; positions outside 1..=count are refused
pub(crate) fn read_entry(file: &mut SlotFile, header: &Header, position: SlotIndex) -> Result<Entry> {
    if !header.holds(position) {
        return Err(StoreError::SlotOutOfRange {
            position,
            count: header.count,
        });
    }
    match file.read_slot(position, Whence::Start)? {
        Slot::Entry(entry) => Ok(entry),
        Slot::Header(_) => Err(StoreError::Corrupt(format!(
            "slot {} decoded as a header",
            position
        ))),
    }
}
