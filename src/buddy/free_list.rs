//! Free-list registry keyed by block size
//!
//! Maintains one FIFO list of free start addresses per power-of-two size
//! class, ordered so the allocator can scan classes ascending. This holds
//! the bookkeeping only; the buddy arithmetic lives with the allocator.

use alloc::collections::{BTreeMap, VecDeque};

use super::block::Block;

/// Free lists for each size class, keyed ascending by block size.
///
/// A size class is present only while it holds at least one address; classes
/// that empty out are removed, never left as empty placeholders.
pub struct FreeLists {
    classes: BTreeMap<usize, VecDeque<usize>>,
}

impl FreeLists {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// Append a free block address to its size class's FIFO list.
    pub fn push(&mut self, size: usize, addr: usize) {
        self.classes.entry(size).or_default().push_back(addr);
    }

    /// Pop the first-inserted address of the smallest class holding blocks
    /// of at least `min_size` bytes.
    pub fn pop_first_at_least(&mut self, min_size: usize) -> Option<Block> {
        let (size, addr, emptied) = {
            let (&size, list) = self.classes.range_mut(min_size..).next()?;
            debug_assert!(!list.is_empty());
            let addr = list.pop_front()?;
            (size, addr, list.is_empty())
        };
        if emptied {
            self.classes.remove(&size);
        }
        Some(Block::new(addr, size))
    }

    /// Remove a specific address from a size class.
    ///
    /// Returns `false` if the class or the address is not present.
    pub fn remove(&mut self, size: usize, addr: usize) -> bool {
        let Some(list) = self.classes.get_mut(&size) else {
            return false;
        };
        let Some(pos) = list.iter().position(|&a| a == addr) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.classes.remove(&size);
        }
        true
    }

    /// Iterate size classes in ascending order with their address lists.
    pub fn classes(&self) -> impl Iterator<Item = (usize, &VecDeque<usize>)> {
        self.classes.iter().map(|(&size, addrs)| (size, addrs))
    }

    /// Iterate all free blocks, ascending by size class and FIFO within one.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.classes
            .iter()
            .flat_map(|(&size, addrs)| addrs.iter().map(move |&addr| Block::new(addr, size)))
    }

    /// Total number of free blocks across all classes.
    pub fn block_count(&self) -> usize {
        self.classes.values().map(VecDeque::len).sum()
    }

    /// Total free bytes across all classes.
    pub fn free_bytes(&self) -> usize {
        self.classes
            .iter()
            .map(|(&size, addrs)| size * addrs.len())
            .sum()
    }
}

impl Default for FreeLists {
    fn default() -> Self {
        Self::new()
    }
}
