//! Buddy arena allocator module
//!
//! This module provides a complete buddy system implementation with:
//! - Size-class free lists with FIFO ordering
//! - On-demand splitting and upward coalescing of buddy pairs
//! - Tracking of outstanding allocations for misuse detection
//! - Usage statistics and a textual free-list snapshot

pub mod block;
pub mod buddy_allocator;
pub mod free_list;
pub mod stats;

pub use block::{block_size_for, Block};
pub use buddy_allocator::BuddyAllocator;
pub use free_list::FreeLists;
pub use stats::BuddyStats;
