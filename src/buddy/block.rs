//! Buddy block metadata
//!
//! Represents a block of the arena with start address and size, plus the
//! power-of-two arithmetic the buddy system is built on.

/// A contiguous power-of-two-sized region of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub addr: usize,
    pub size: usize,
}

impl Block {
    /// Create a new block.
    pub const fn new(addr: usize, size: usize) -> Self {
        Self { addr, size }
    }

    /// Calculate the buddy address for this block.
    ///
    /// The buddy is the other half of the parent block at the doubled size:
    /// for a block of size `s` at address `a`, its buddy is at `a ^ s`.
    pub const fn buddy_addr(&self) -> usize {
        self.addr ^ self.size
    }

    /// Halve this block in place and return the upper half.
    ///
    /// The lower half keeps the original address; the returned upper half
    /// starts at `addr + size / 2`.
    pub fn split(&mut self) -> Block {
        self.size /= 2;
        Block::new(self.addr + self.size, self.size)
    }

    /// Merge this block with its buddy at `buddy_addr`, in place.
    ///
    /// The merged block keeps the lower of the two addresses and doubles in
    /// size.
    pub fn merge(&mut self, buddy_addr: usize) {
        self.addr = self.addr.min(buddy_addr);
        self.size *= 2;
    }
}

/// Round a request up to the smallest power-of-two block size that can hold
/// it.
///
/// Zero-size requests round up to the minimum block size of one byte.
/// Returns `None` if the next power of two would overflow `usize`.
pub fn block_size_for(request: usize) -> Option<usize> {
    if request == 0 {
        return Some(1);
    }
    request.checked_next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_rounding() {
        assert_eq!(block_size_for(0), Some(1));
        assert_eq!(block_size_for(1), Some(1));
        assert_eq!(block_size_for(2), Some(2));
        assert_eq!(block_size_for(3), Some(4));
        assert_eq!(block_size_for(100), Some(128));
        assert_eq!(block_size_for((1 << 20) + 1), Some(1 << 21));
        assert_eq!(block_size_for(usize::MAX), None);
    }

    #[test]
    fn test_rounding_is_idempotent_on_powers_of_two() {
        for shift in 0..usize::BITS {
            let size = 1usize << shift;
            assert_eq!(block_size_for(size), Some(size));
        }
    }

    #[test]
    fn test_buddy_addr_is_symmetric() {
        let lower = Block::new(0, 128);
        let upper = Block::new(128, 128);
        assert_eq!(lower.buddy_addr(), upper.addr);
        assert_eq!(upper.buddy_addr(), lower.addr);

        let block = Block::new(0x300, 0x100);
        assert_eq!(block.buddy_addr(), 0x200);
    }

    #[test]
    fn test_split_keeps_lower_half() {
        let mut block = Block::new(512, 512);
        let upper = block.split();
        assert_eq!(block, Block::new(512, 256));
        assert_eq!(upper, Block::new(768, 256));
    }

    #[test]
    fn test_merge_takes_lower_addr() {
        let mut block = Block::new(128, 128);
        block.merge(0);
        assert_eq!(block, Block::new(0, 256));

        let mut block = Block::new(0, 256);
        block.merge(256);
        assert_eq!(block, Block::new(0, 512));
    }
}
