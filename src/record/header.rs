//! Header record (slot 0)

use super::SlotIndex;

/// First record of the file: allocation mark and the two list roots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of entry slots ever allocated (high-water mark)
    pub count: SlotIndex,

    /// First slot of the sorted live list
    pub head: Option<SlotIndex>,

    /// First slot of the free list
    pub free: Option<SlotIndex>,
}

impl Header {
    /// Header of a freshly initialized file
    pub const fn empty() -> Self {
        Self {
            count: 0,
            head: None,
            free: None,
        }
    }

    /// Whether `position` names an allocated entry slot
    pub fn holds(&self, position: SlotIndex) -> bool {
        position >= 1 && position <= self.count
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::empty()
    }
}
