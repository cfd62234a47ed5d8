//! Lock-guarded buddy allocator for shared use
//!
//! The core [`BuddyAllocator`] is single-threaded by design; deployments
//! that share one arena across contexts wrap it here, with a single spinlock
//! guarding the free lists around every call.

use alloc::string::String;

use kspin::SpinNoIrq;

use crate::buddy::{BuddyAllocator, BuddyStats};
use crate::AllocResult;

/// A [`BuddyAllocator`] behind a [`SpinNoIrq`] lock, usable through `&self`.
pub struct LockedBuddyAllocator {
    inner: SpinNoIrq<BuddyAllocator>,
}

impl LockedBuddyAllocator {
    /// Create a locked allocator for an arena of `total_bytes`.
    pub fn new(total_bytes: usize) -> AllocResult<Self> {
        Ok(Self {
            inner: SpinNoIrq::new(BuddyAllocator::new(total_bytes)?),
        })
    }

    /// Allocate a block of at least `size` bytes.
    pub fn alloc(&self, size: usize) -> AllocResult<usize> {
        self.inner.lock().alloc(size)
    }

    /// Free the block at `addr` that was allocated with the given `size`.
    pub fn dealloc(&self, addr: usize, size: usize) -> AllocResult {
        self.inner.lock().dealloc(addr, size)
    }

    /// Total size of the arena in bytes.
    pub fn total_bytes(&self) -> usize {
        self.inner.lock().total_bytes()
    }

    /// Bytes currently allocated.
    pub fn used_bytes(&self) -> usize {
        self.inner.lock().used_bytes()
    }

    /// Bytes currently free.
    pub fn available_bytes(&self) -> usize {
        self.inner.lock().available_bytes()
    }

    /// Collect usage statistics.
    pub fn stats(&self) -> BuddyStats {
        self.inner.lock().stats()
    }

    /// Render the free lists as human-readable text.
    pub fn snapshot(&self) -> String {
        self.inner.lock().snapshot()
    }
}
