//! Buddy Arena Allocator
//!
//! This crate implements a buddy-system allocator over a fixed arena of
//! conceptual byte offsets, featuring:
//! - Power-of-two size classes with on-demand block splitting
//! - Upward coalescing of freed buddy pairs
//! - FIFO free lists for deterministic, reproducible behavior
//! - Double-free and size-mismatch detection
//!
//! Addresses are offsets into a flat `[0, total_bytes)` range; the crate
//! never touches real memory, so it is `no_std` and free of `unsafe`.

#![no_std]

extern crate alloc;

// Logging support - conditionally import log crate
#[cfg(feature = "log")]
extern crate log;

// Stub macros when log is disabled - these become no-ops
#[cfg(not(feature = "log"))]
macro_rules! error {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// The error type used for allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Invalid arena size, request size, or address. (e.g. unaligned)
    InvalidParam,
    /// No enough memory to allocate.
    NoMemory,
    /// Deallocate an unallocated memory region.
    NotAllocated,
}

/// A [`Result`] type with [`AllocError`] as the error type.
pub type AllocResult<T = ()> = Result<T, AllocError>;

/// Byte-granularity allocator over a flat arena of offsets.
pub trait ByteAllocator {
    /// Allocate a block of at least `size` bytes, returning its start
    /// address (an offset into the arena).
    fn alloc(&mut self, size: usize) -> AllocResult<usize>;

    /// Deallocate the block at the given start address and size.
    fn dealloc(&mut self, addr: usize, size: usize) -> AllocResult;

    /// Returns total memory size in bytes.
    fn total_bytes(&self) -> usize;

    /// Returns allocated memory size in bytes.
    fn used_bytes(&self) -> usize;

    /// Returns available memory size in bytes.
    fn available_bytes(&self) -> usize;
}

/// Checks whether the address has the demanded alignment.
///
/// Equivalent to `addr % align == 0`, but the alignment must be a power of two.
#[inline]
const fn is_aligned(base_addr: usize, align: usize) -> bool {
    base_addr & (align - 1) == 0
}

// Export our allocator implementations
pub mod buddy;
pub use buddy::{block_size_for, Block, BuddyAllocator, BuddyStats, FreeLists};

pub mod locked;
pub use locked::LockedBuddyAllocator;
