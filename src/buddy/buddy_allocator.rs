//! Buddy allocator over a fixed arena of offsets
//!
//! Implements the core buddy system for a single arena: requests round up to
//! power-of-two block sizes, free blocks split on demand, and freed blocks
//! coalesce with their buddies back toward the full arena size.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::{AllocError, AllocResult, ByteAllocator};

#[cfg(feature = "log")]
use log::{debug, error, warn};

use super::{
    block::{block_size_for, Block},
    free_list::FreeLists,
    stats::{render_free_lists, BuddyStats},
};

/// A buddy-system allocator managing the conceptual range `[0, total_bytes)`.
///
/// Addresses are plain offsets; no real memory is touched. Outstanding
/// allocations are tracked so misuse (double free, wrong size) is reported
/// instead of silently corrupting the free lists.
pub struct BuddyAllocator {
    total_bytes: usize,
    used_bytes: usize,
    free: FreeLists,
    /// Outstanding allocations: start address -> rounded block size.
    allocated: BTreeMap<usize, usize>,
}

impl BuddyAllocator {
    /// Create an allocator for an arena of `total_bytes`, initially one free
    /// block at address 0.
    ///
    /// `total_bytes` must be a nonzero power of two; buddy address arithmetic
    /// relies on it, so anything else is rejected up front.
    pub fn new(total_bytes: usize) -> AllocResult<Self> {
        if total_bytes == 0 || !total_bytes.is_power_of_two() {
            error!(
                "buddy allocator: arena size {:#x} is not a power of two",
                total_bytes
            );
            return Err(AllocError::InvalidParam);
        }

        let mut free = FreeLists::new();
        free.push(total_bytes, 0);

        Ok(Self {
            total_bytes,
            used_bytes: 0,
            free,
            allocated: BTreeMap::new(),
        })
    }

    /// Allocate a block of at least `size` bytes and return its start
    /// address.
    ///
    /// The request rounds up to the next power of two (zero rounds to one
    /// byte). The smallest sufficient size class donates its first-inserted
    /// block, splitting upper halves back into the free lists until the block
    /// fits exactly. Fails with [`AllocError::NoMemory`] when no class can
    /// satisfy the request, leaving the free lists untouched.
    pub fn alloc(&mut self, size: usize) -> AllocResult<usize> {
        let block_size = match block_size_for(size) {
            Some(block_size) if block_size <= self.total_bytes => block_size,
            _ => {
                debug!(
                    "buddy allocator: request of {} bytes exceeds arena of {} bytes",
                    size, self.total_bytes
                );
                return Err(AllocError::NoMemory);
            }
        };

        let Some(mut block) = self.free.pop_first_at_least(block_size) else {
            debug!(
                "buddy allocator: no free block for {} bytes ({} byte class)",
                size, block_size
            );
            return Err(AllocError::NoMemory);
        };

        // Split down to the required size; upper halves stay free.
        while block.size > block_size {
            let upper = block.split();
            self.free.push(upper.size, upper.addr);
        }

        self.allocated.insert(block.addr, block.size);
        self.used_bytes += block.size;
        Ok(block.addr)
    }

    /// Free the block at `addr` that was allocated with the given `size`.
    ///
    /// `size` rounds exactly as in [`alloc`](Self::alloc), so passing either
    /// the original request or its rounded block size is accepted. The freed
    /// block coalesces with its buddy repeatedly while the buddy is also
    /// free, then the merged block rejoins the free lists.
    pub fn dealloc(&mut self, addr: usize, size: usize) -> AllocResult {
        let Some(block_size) = block_size_for(size) else {
            error!("buddy allocator: free size {} has no size class", size);
            return Err(AllocError::InvalidParam);
        };

        if addr >= self.total_bytes || block_size > self.total_bytes {
            error!(
                "buddy allocator: free of {:#x} ({} bytes) is outside the arena",
                addr, block_size
            );
            return Err(AllocError::InvalidParam);
        }

        if !crate::is_aligned(addr, block_size) {
            error!(
                "buddy allocator: address {:#x} is not aligned to {} bytes",
                addr, block_size
            );
            return Err(AllocError::InvalidParam);
        }

        match self.allocated.get(&addr) {
            Some(&outstanding) if outstanding == block_size => {}
            Some(&_outstanding) => {
                warn!(
                    "buddy allocator: size mismatch freeing {:#x}: {} bytes outstanding, {} given",
                    addr, _outstanding, block_size
                );
                return Err(AllocError::NotAllocated);
            }
            None => {
                warn!(
                    "buddy allocator: double free or unknown block at {:#x}",
                    addr
                );
                return Err(AllocError::NotAllocated);
            }
        }

        self.allocated.remove(&addr);
        self.used_bytes -= block_size;

        // Coalesce upward while the buddy is also free.
        let mut block = Block::new(addr, block_size);
        while block.size < self.total_bytes {
            let buddy_addr = block.buddy_addr();
            if !self.free.remove(block.size, buddy_addr) {
                break;
            }
            block.merge(buddy_addr);
        }
        self.free.push(block.size, block.addr);

        Ok(())
    }

    /// Total size of the arena in bytes.
    pub const fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Bytes currently allocated, counted at rounded block sizes.
    pub const fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Bytes currently free.
    pub fn available_bytes(&self) -> usize {
        self.total_bytes.saturating_sub(self.used_bytes)
    }

    /// Iterate all free blocks, ascending by size class and FIFO within one.
    pub fn free_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.free.blocks()
    }

    /// Collect usage statistics.
    pub fn stats(&self) -> BuddyStats {
        BuddyStats::collect(&self.free, self.total_bytes, self.used_bytes)
    }

    /// Render the free lists as human-readable text, one size class per line
    /// in ascending order.
    pub fn snapshot(&self) -> String {
        render_free_lists(&self.free)
    }
}

impl ByteAllocator for BuddyAllocator {
    fn alloc(&mut self, size: usize) -> AllocResult<usize> {
        BuddyAllocator::alloc(self, size)
    }

    fn dealloc(&mut self, addr: usize, size: usize) -> AllocResult {
        BuddyAllocator::dealloc(self, addr, size)
    }

    fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    fn available_bytes(&self) -> usize {
        BuddyAllocator::available_bytes(self)
    }
}
