//! Exact sliding-window access counter.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::common::BlockId;

/// Counts how often each block appears among the last `capacity` accesses.
///
/// Exact, not a sketch: memory is O(capacity). Blocks whose count falls to
/// zero are forgotten immediately, so every tracked count is positive and
/// the counts always sum to the window length.
#[derive(Debug)]
pub struct FrequencyWindow {
    window: VecDeque<BlockId>,
    counts: FxHashMap<BlockId, u32>,
    capacity: usize,
}

impl FrequencyWindow {
    /// Create a window over the last `capacity` accesses.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            counts: FxHashMap::default(),
            capacity,
        }
    }

    /// Record an access and return the block's count afterwards.
    pub fn record(&mut self, block: BlockId) -> u32 {
        self.window.push_back(block);
        *self.counts.entry(block).or_insert(0) += 1;

        if self.window.len() > self.capacity {
            if let Some(oldest) = self.window.pop_front() {
                self.decrement(oldest);
            }
        }

        self.count(block)
    }

    /// Accesses to `block` within the window.
    pub fn count(&self, block: BlockId) -> u32 {
        self.counts.get(&block).copied().unwrap_or(0)
    }

    /// Accesses currently in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Distinct blocks in the window.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    fn decrement(&mut self, block: BlockId) {
        if let Some(count) = self.counts.get_mut(&block) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&block);
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.window.len() <= self.capacity);
        let total: u64 = self.counts.values().map(|&c| u64::from(c)).sum();
        assert_eq!(total, self.window.len() as u64);
        assert!(self.counts.values().all(|&c| c > 0));
    }
}
