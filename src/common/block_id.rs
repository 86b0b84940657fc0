//! Block identifier type.

use std::fmt;

use rustc_hash::FxHashSet;

/// Identifies a cached block.
///
/// Opaque: ids are compared and hashed, never ordered. Workloads number
/// blocks from 1, so `BlockId(0)` never appears in a generated sequence.
///
/// # Example
/// ```
/// use cachesim::BlockId;
///
/// let block = BlockId::new(42);
/// assert_eq!(block.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Create a new BlockId.
    #[inline]
    pub fn new(id: u64) -> Self {
        BlockId(id)
    }

    /// The block a next-line prefetcher fetches after this one.
    ///
    /// Wraps around an id space of `n_blocks`: `(id mod n_blocks) + 1`.
    #[inline]
    pub fn next_in(self, n_blocks: u64) -> BlockId {
        BlockId(self.0 % n_blocks.max(1) + 1)
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        BlockId(id)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0)
    }
}

/// The set of blocks physically held by a cache.
///
/// This is what policies receive as eviction candidates.
pub type BlockSet = FxHashSet<BlockId>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_new() {
        let bid = BlockId::new(10);
        assert_eq!(bid.0, 10);
        assert_eq!(BlockId::from(10), bid);
    }

    #[test]
    fn test_block_id_equality() {
        assert_eq!(BlockId::new(5), BlockId::new(5));
        assert_ne!(BlockId::new(5), BlockId::new(6));
    }

    #[test]
    fn test_block_id_display() {
        assert_eq!(format!("{}", BlockId::new(42)), "Block(42)");
    }

    #[test]
    fn test_next_in_wraps() {
        assert_eq!(BlockId::new(1).next_in(100), BlockId::new(2));
        assert_eq!(BlockId::new(99).next_in(100), BlockId::new(100));
        assert_eq!(BlockId::new(100).next_in(100), BlockId::new(1));
    }
}
