//! Max-heap of file sizes keyed by node handle.
//!
//! An implicit binary heap in a `Vec`. Besides the usual push and peek it
//! supports removing an arbitrary handle, which the filesystem needs when
//! a file that is not the largest is deleted or resized.

use crate::error::{Error, Result};
use crate::handle::Handle;

/// One tracked `(size, handle)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEntry {
    pub size: u64,
    pub handle: Handle,
}

#[derive(Debug, Clone, Default)]
pub struct FileSizeHeap {
    entries: Vec<SizeEntry>,
}

impl FileSizeHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, size: u64, handle: Handle) {
        self.entries.push(SizeEntry { size, handle });
        self.sift_up(self.entries.len() - 1);
    }

    /// Handle with the largest size. Ties resolve arbitrarily.
    pub fn top(&self) -> Result<Handle> {
        self.entries
            .first()
            .map(|entry| entry.handle)
            .ok_or(Error::HeapEmpty)
    }

    /// Removes the entry for `handle`, wherever it sits in the heap.
    pub fn remove(&mut self, handle: Handle) -> Result<SizeEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.handle == handle)
            .ok_or_else(|| Error::not_found(handle))?;

        let removed = self.entries.swap_remove(index);
        if index < self.entries.len() {
            // The relocated entry may belong above or below its new slot.
            let index = self.sift_up(index);
            self.sift_down(index);
        }
        Ok(removed)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = &SizeEntry> {
        self.entries.iter()
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].size <= self.entries[parent].size {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let larger = if right < len && self.entries[right].size > self.entries[left].size {
                right
            } else {
                left
            };
            if self.entries[larger].size <= self.entries[index].size {
                break;
            }
            self.entries.swap(index, larger);
            index = larger;
        }
    }
}
