//! Bounded history of blocks recently evicted from probation.
//!
//! Stores ids only. A hit here means probation was too small to keep a
//! block that turned out to be reused.

use crate::common::BlockId;
use crate::ds::LinkedSet;

/// Bounded FIFO of ghost entries.
///
/// When full, recording a new id silently discards the oldest one.
#[derive(Debug)]
pub struct GhostHistory {
    entries: LinkedSet<BlockId>,
    capacity: usize,
}

impl GhostHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LinkedSet::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, block: BlockId) -> bool {
        self.entries.contains(&block)
    }

    /// Append `block` as the newest ghost.
    pub fn record(&mut self, block: BlockId) {
        if self.capacity == 0 {
            return;
        }
        // A block already present keeps its original position.
        if self.entries.contains(&block) {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(block);
    }

    /// Remove `block`; returns `true` if it was present.
    pub fn remove(&mut self, block: BlockId) -> bool {
        self.entries.remove(&block)
    }

    /// Change the capacity, keeping the newest entries that still fit.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
    }

    /// Ghosts from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &BlockId> {
        self.entries.iter()
    }
}
