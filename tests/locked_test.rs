//! Tests for the lock-guarded allocator wrapper
//!
//! The core allocator is single-threaded; these tests drive the spinlocked
//! wrapper from several threads and check the arena balances out.

use std::sync::Arc;
use std::thread;

use buddy_arena::LockedBuddyAllocator;

const ARENA_SIZE: usize = 1 << 20;
const THREADS: usize = 8;
const ROUNDS: usize = 5000;

#[test]
fn test_locked_allocator_basic() {
    let buddy = LockedBuddyAllocator::new(1024).unwrap();

    let addr = buddy.alloc(100).unwrap();
    assert_eq!(addr, 0);
    assert_eq!(buddy.used_bytes(), 128);
    assert_eq!(buddy.total_bytes(), 1024);

    buddy.dealloc(addr, 100).unwrap();
    assert_eq!(buddy.available_bytes(), 1024);
    assert_eq!(buddy.snapshot(), "block size 1024: [0]\n");
}

#[test]
fn test_locked_allocator_rejects_bad_arena() {
    assert!(LockedBuddyAllocator::new(0).is_err());
    assert!(LockedBuddyAllocator::new(1000).is_err());
}

#[test]
fn test_locked_allocator_across_threads() {
    let buddy = Arc::new(LockedBuddyAllocator::new(ARENA_SIZE).unwrap());

    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let buddy = Arc::clone(&buddy);
        handles.push(thread::spawn(move || {
            for _ in 0..ROUNDS {
                // At most one 4 KiB block per thread is outstanding, far
                // below the arena size, so allocation must always succeed.
                let addr = buddy.alloc(4096).expect("arena has plenty of room");
                buddy.dealloc(addr, 4096).expect("freeing own block");
            }
        }));
    }

    // A concurrent reader must see a consistent registry at every instant.
    let reader = Arc::clone(&buddy);
    handles.push(thread::spawn(move || {
        for _ in 0..ROUNDS {
            let stats = reader.stats();
            assert!(stats.used_bytes <= THREADS * 4096);
            assert_eq!(stats.used_bytes + stats.free_bytes, stats.total_bytes);
        }
    }));

    for handle in handles {
        handle.join().unwrap();
    }

    // Every thread freed what it allocated, so the arena is whole again.
    assert_eq!(buddy.used_bytes(), 0);
    assert_eq!(buddy.available_bytes(), ARENA_SIZE);
    assert_eq!(buddy.stats().free_blocks_by_size.get(&ARENA_SIZE), Some(&1));
}
