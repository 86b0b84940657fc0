//! LRU (Least Recently Used) replacement policy.
//!
//! The baseline every other policy is compared against.

use tracing::warn;

use crate::common::{BlockId, BlockSet, Result};
use crate::ds::LinkedSet;
use crate::policy::{any_candidate, EvictionPolicy};

/// Strict least-recently-used eviction.
///
/// Every access moves the block to the most-recently-used end, hit or miss.
/// Eviction walks from the least-recent end and takes the first block that
/// is still cached.
#[derive(Debug, Default)]
pub struct LruPolicy {
    /// Front = least recent, back = most recent.
    order: LinkedSet<BlockId>,
}

impl LruPolicy {
    /// Create an empty LRU policy.
    pub fn new() -> Self {
        Self {
            order: LinkedSet::new(),
        }
    }

    /// Number of blocks tracked.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Blocks from least to most recently used.
    pub fn recency_order(&self) -> Vec<BlockId> {
        self.order.iter().copied().collect()
    }
}

impl EvictionPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn update(&mut self, block: BlockId, _was_hit: bool) {
        self.order.touch(block);
    }

    fn evict(&mut self, candidates: &BlockSet) -> Result<BlockId> {
        if candidates.is_empty() {
            return any_candidate(candidates);
        }

        if let Some(victim) = self.order.remove_first_where(|b| candidates.contains(b)) {
            return Ok(victim);
        }

        // Nothing tracked is cached: the bookkeeping is stale. Give up the
        // globally least-recent entry even though the caller does not hold it.
        match self.order.pop_front() {
            Some(stale) => {
                warn!(block = %stale, "lru order is stale, evicting untracked block");
                Ok(stale)
            }
            None => any_candidate(candidates),
        }
    }
}
