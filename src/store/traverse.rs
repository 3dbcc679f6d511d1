//! Traversals
//!
//! Two views of the same file:
//! - logical: `head -> next -> ... -> none`, live entries in key order
//! - physical: slots `1..=count` in allocation order, free slots included
//!   with whatever key they held before deletion

use std::io::Write;

use crate::error::{Result, StoreError};
use crate::record::{Entry, Header, Slot, SlotIndex};
use crate::storage::{SlotFile, Whence};

use super::{read_entry, read_header, Store};

/// Iterator over live entries in sort order
pub struct ListIter<'a> {
    file: &'a mut SlotFile,
    header: Header,
    link: Option<SlotIndex>,
    visited: SlotIndex,
}

impl Iterator for ListIter<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.link.take()?;

        if self.visited >= self.header.count && self.header.holds(position) {
            return Some(Err(StoreError::Corrupt(
                "live list does not terminate".to_string(),
            )));
        }
        self.visited += 1;

        let entry = read_entry(self.file, &self.header, position);
        if let Ok(entry) = &entry {
            self.link = entry.next;
        }
        Some(entry)
    }
}

/// Iterator over slots `1..=count` in physical order
pub struct FileIter<'a> {
    file: &'a mut SlotFile,
    count: SlotIndex,
    position: SlotIndex,
    failed: bool,
}

impl Iterator for FileIter<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position > self.count {
            return None;
        }
        self.position += 1;

        // Sequential read: each slot follows the one just read.
        let slot = match self.file.read_slot(0, Whence::Current) {
            Ok(Slot::Entry(entry)) => Ok(entry),
            Ok(Slot::Header(_)) => Err(StoreError::Corrupt(
                "header found during physical traversal".to_string(),
            )),
            Err(e) => Err(e),
        };
        self.failed = slot.is_err();
        Some(slot)
    }
}

impl Store {
    /// Live entries following the `next` chain from `head`
    pub fn list_entries(&mut self) -> Result<ListIter<'_>> {
        let header = read_header(&mut self.file)?;
        Ok(ListIter {
            file: &mut self.file,
            link: header.head,
            header,
            visited: 0,
        })
    }

    /// Every allocated slot in position order, live or free
    pub fn file_entries(&mut self) -> Result<FileIter<'_>> {
        let header = read_header(&mut self.file)?;
        self.file.seek_slot(1)?;
        Ok(FileIter {
            file: &mut self.file,
            count: header.count,
            position: 1,
            failed: false,
        })
    }

    /// Write the live list in sort order
    pub fn print_list<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for entry in self.list_entries()? {
            write_node(out, &entry?)?;
        }
        Ok(())
    }

    /// Write the header, then every allocated slot in physical order
    pub fn print_file<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let header = read_header(&mut self.file)?;
        writeln!(out, "FILE HEADER:")?;
        writeln!(out, "  number of nodes:   {}", header.count)?;
        writeln!(out, "  first node index:  {}", link_text(header.head))?;
        writeln!(out, "  avail node index:  {}", link_text(header.free))?;

        for entry in self.file_entries()? {
            write_node(out, &entry?)?;
        }
        Ok(())
    }
}

fn write_node<W: Write>(out: &mut W, entry: &Entry) -> Result<()> {
    writeln!(out, "NODE {}", entry.id)?;
    writeln!(out, "  name: {}", entry.key)?;
    writeln!(out, "  next: {}", link_text(entry.next))?;
    Ok(())
}

fn link_text(link: Option<SlotIndex>) -> i64 {
    link.map_or(-1, i64::from)
}
