//! Statistics and snapshot rendering for the buddy arena
//!
//! Keeps reporting concerns out of the allocation logic.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt::Write;

use super::free_list::FreeLists;

/// Point-in-time usage summary for a buddy arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuddyStats {
    pub total_bytes: usize,
    pub used_bytes: usize,
    pub free_bytes: usize,
    /// Number of free blocks per size class, ascending by block size.
    pub free_blocks_by_size: BTreeMap<usize, usize>,
}

impl BuddyStats {
    /// Collect statistics from the free lists of an arena of `total_bytes`.
    pub(crate) fn collect(free: &FreeLists, total_bytes: usize, used_bytes: usize) -> Self {
        let mut free_blocks_by_size = BTreeMap::new();
        for (size, addrs) in free.classes() {
            free_blocks_by_size.insert(size, addrs.len());
        }
        Self {
            total_bytes,
            used_bytes,
            free_bytes: free.free_bytes(),
            free_blocks_by_size,
        }
    }
}

/// Render the free lists as one `block size N: [addrs]` line per size class,
/// ascending; empty when nothing is free.
///
/// This is a standalone function to keep allocation logic clean.
pub(crate) fn render_free_lists(free: &FreeLists) -> String {
    let mut out = String::new();
    for (size, addrs) in free.classes() {
        let _ = writeln!(out, "block size {}: {:?}", size, addrs);
    }
    out
}
