//! Tests for SlotFile
//!
//! These tests verify:
//! - Positional addressing (slot i at byte i * SLOT_SIZE)
//! - Reads beyond the file extent are refused, not invented
//! - Writes past the end extend the file
//! - Start vs Current seek origins
//! - Self-identification of entry slots

use std::path::PathBuf;

use relstore::record::{Entry, Header, Key, Slot, SLOT_SIZE};
use relstore::storage::{SlotFile, Whence};
use relstore::StoreError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("slots.bin");
    (temp_dir, path)
}

fn entry(id: u32, name: &str, next: Option<u32>) -> Slot {
    Slot::Entry(Entry::new(id, Key::new(name).unwrap(), next))
}

fn file_len(path: &PathBuf) -> u64 {
    std::fs::metadata(path).unwrap().len()
}

// =============================================================================
// Create/Open Tests
// =============================================================================

#[test]
fn test_create_starts_empty() {
    let (_temp, path) = setup_temp_file();

    let file = SlotFile::create(&path).unwrap();

    assert_eq!(file.extent(), 0);
    assert_eq!(file_len(&path), 0);
}

#[test]
fn test_create_truncates_existing() {
    let (_temp, path) = setup_temp_file();
    std::fs::write(&path, vec![7u8; SLOT_SIZE * 3]).unwrap();

    let file = SlotFile::create(&path).unwrap();

    assert_eq!(file.extent(), 0);
    assert_eq!(file_len(&path), 0);
}

#[test]
fn test_open_missing_file_fails() {
    let (_temp, path) = setup_temp_file();

    let result = SlotFile::open(&path);

    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn test_open_keeps_contents() {
    let (_temp, path) = setup_temp_file();
    {
        let mut file = SlotFile::create(&path).unwrap();
        file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start).unwrap();
        file.write_slot(&entry(1, "kept", None), 1, Whence::Start).unwrap();
    }

    let mut file = SlotFile::open(&path).unwrap();

    assert_eq!(file.extent(), 2);
    assert_eq!(file.read_slot(1, Whence::Start).unwrap(), entry(1, "kept", None));
}

// =============================================================================
// Positional Read/Write Tests
// =============================================================================

#[test]
fn test_write_then_read_at_position() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();

    let header = Slot::Header(Header {
        count: 2,
        head: Some(2),
        free: None,
    });
    file.write_slot(&header, 0, Whence::Start).unwrap();
    file.write_slot(&entry(1, "b", None), 1, Whence::Start).unwrap();
    file.write_slot(&entry(2, "a", Some(1)), 2, Whence::Start).unwrap();

    assert_eq!(file_len(&path), 3 * SLOT_SIZE as u64);
    assert_eq!(file.read_slot(0, Whence::Start).unwrap(), header);
    assert_eq!(file.read_slot(2, Whence::Start).unwrap(), entry(2, "a", Some(1)));
    assert_eq!(file.read_slot(1, Whence::Start).unwrap(), entry(1, "b", None));
}

#[test]
fn test_overwrite_in_place() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();

    file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start).unwrap();
    file.write_slot(&entry(1, "first", None), 1, Whence::Start).unwrap();
    file.write_slot(&entry(1, "second", None), 1, Whence::Start).unwrap();

    assert_eq!(file.extent(), 2);
    assert_eq!(file.read_slot(1, Whence::Start).unwrap(), entry(1, "second", None));
}

#[test]
fn test_write_past_end_extends_file() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();

    file.write_slot(&entry(3, "far", None), 3, Whence::Start).unwrap();

    assert_eq!(file.extent(), 4);
    assert_eq!(file_len(&path), 4 * SLOT_SIZE as u64);
}

#[test]
fn test_read_beyond_extent_is_refused() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();
    file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start).unwrap();

    let result = file.read_slot(1, Whence::Start);

    assert!(matches!(
        result,
        Err(StoreError::SlotOutOfRange { position: 1, count: 0 })
    ));
}

#[test]
fn test_read_of_unwritten_gap_is_corrupt() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();
    file.write_slot(&entry(3, "far", None), 3, Whence::Start).unwrap();

    // Slot 2 lies inside the file but was never written: all zeros
    let result = file.read_slot(2, Whence::Start);

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_entry_must_identify_its_own_slot() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();
    file.write_slot(&entry(5, "misplaced", None), 2, Whence::Start).unwrap();

    let result = file.read_slot(2, Whence::Start);

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

// =============================================================================
// Seek Origin Tests
// =============================================================================

#[test]
fn test_sequential_reads_from_current_position() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();
    file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start).unwrap();
    for (id, name) in [(1, "one"), (2, "two"), (3, "three")] {
        file.write_slot(&entry(id, name, None), id, Whence::Start).unwrap();
    }

    file.seek_slot(1).unwrap();
    let read: Vec<Slot> = (0..3)
        .map(|_| file.read_slot(0, Whence::Current).unwrap())
        .collect();

    assert_eq!(
        read,
        vec![entry(1, "one", None), entry(2, "two", None), entry(3, "three", None)]
    );
}

#[test]
fn test_current_origin_skips_slots() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();
    file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start).unwrap();
    for id in 1..=4 {
        file.write_slot(&entry(id, "x", None), id, Whence::Start).unwrap();
    }

    file.seek_slot(1).unwrap();
    // From slot 1, skip one slot forward to slot 2
    let slot = file.read_slot(1, Whence::Current).unwrap();

    assert_eq!(slot, entry(2, "x", None));
}

#[test]
fn test_sequential_writes_from_current_position() {
    let (_temp, path) = setup_temp_file();
    let mut file = SlotFile::create(&path).unwrap();

    file.write_slot(&Slot::Header(Header::empty()), 0, Whence::Start).unwrap();
    file.write_slot(&entry(1, "a", None), 0, Whence::Current).unwrap();
    file.write_slot(&entry(2, "b", None), 0, Whence::Current).unwrap();

    assert_eq!(file.extent(), 3);
    assert_eq!(file.read_slot(2, Whence::Start).unwrap(), entry(2, "b", None));
}
