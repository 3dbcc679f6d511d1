//! Slot File
//!
//! Reads and writes whole slots at fixed positions.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::record::codec::SlotBuf;
use crate::record::{Slot, SlotIndex, SLOT_SIZE};

/// Origin for a positional seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Offset from the start of the file
    Start,

    /// Offset from the current file position
    Current,
}

/// Backing file viewed as an array of fixed-size slots
pub struct SlotFile {
    /// Exclusive handle, closed on drop
    file: File,

    /// Current file length in bytes
    len: u64,
}

impl SlotFile {
    /// Create the file, truncating anything already there
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self { file, len: 0 })
    }

    /// Open an existing file without truncating it
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let len = file.metadata()?.len();

        Ok(Self { file, len })
    }

    /// Read one slot
    ///
    /// The slot is decoded as a header at position 0 and as an entry
    /// everywhere else. Entries must carry their own position as id.
    pub fn read_slot(&mut self, position: SlotIndex, whence: Whence) -> Result<Slot> {
        let offset = self.resolve(position, whence)?;
        let absolute = (offset / SLOT_SIZE as u64) as SlotIndex;

        if offset + SLOT_SIZE as u64 > self.len {
            return Err(StoreError::SlotOutOfRange {
                position: absolute,
                count: self.extent().saturating_sub(1),
            });
        }

        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf: SlotBuf = [0u8; SLOT_SIZE];
        self.file.read_exact(&mut buf)?;

        let slot = Slot::decode(absolute, &buf)?;
        if let Slot::Entry(entry) = &slot {
            if entry.id != absolute {
                return Err(StoreError::Corrupt(format!(
                    "slot {} identifies itself as {}",
                    absolute, entry.id
                )));
            }
        }

        tracing::trace!(position = absolute, "read slot");
        Ok(slot)
    }

    /// Write one slot in place, extending the file if it lies past the end
    pub fn write_slot(&mut self, slot: &Slot, position: SlotIndex, whence: Whence) -> Result<()> {
        let offset = self.resolve(position, whence)?;

        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&slot.encode())?;
        self.len = self.len.max(offset + SLOT_SIZE as u64);

        tracing::trace!(position = offset / SLOT_SIZE as u64, "wrote slot");
        Ok(())
    }

    /// Move the file position to the start of a slot
    pub fn seek_slot(&mut self, position: SlotIndex) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(position as u64 * SLOT_SIZE as u64))?;
        Ok(())
    }

    /// Number of whole slots physically present
    pub fn extent(&self) -> SlotIndex {
        (self.len / SLOT_SIZE as u64) as SlotIndex
    }

    /// Flush file contents to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_data()?;
        Ok(())
    }

    /// Byte offset of `position` slots from `whence`
    fn resolve(&mut self, position: SlotIndex, whence: Whence) -> Result<u64> {
        let delta = position as u64 * SLOT_SIZE as u64;
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.file.stream_position()?,
        };
        if base % SLOT_SIZE as u64 != 0 {
            return Err(StoreError::Corrupt(format!(
                "file position {} is not on a slot boundary",
                base
            )));
        }
        Ok(base + delta)
    }
}
