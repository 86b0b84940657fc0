//! TinyLFU admission in front of an adaptive segmented LRU.
//!
//! # Architecture
//! ```text
//!   access ──► FrequencyWindow (last W accesses, exact counts)
//!                 │
//!                 ▼
//!   ┌──────────────────────────────┐  reuse   ┌──────────────────────────┐
//!   │ Probation (FIFO, prob_size)  │ ───────► │ Protected (LRU, prot_size)│
//!   └──────────────────────────────┘          └──────────────────────────┘
//!        ▲ freq >= 2        │ head pushed out          ▲       │ LRU dropped
//!        │                  ▼                          │       ▼
//!     cold miss      GhostHistory (FIFO, prob_size) ───┘    (untracked)
//!                        ghost hit: grow probation, admit to protected
//! ```
//!
//! `prob_size + prot_size` always equals the cache capacity. The split is
//! tuned by [`AdaptivePartitioner`] from ghost-hit feedback.
//!
//! The policy tracks less than the caller caches: cold misses below the
//! admission threshold are never tracked, and protected drops its LRU block
//! outright when a promotion needs room. `evict` tolerates both by falling
//! back to any cached block.

mod frequency_window;
mod ghost_history;
mod partition;
mod segment;

use tracing::{debug, trace};

use crate::common::config::{TinyLfuConfig, ADMISSION_THRESHOLD};
use crate::common::{BlockId, BlockSet, Error, Result};
use crate::policy::{any_candidate, EvictionPolicy};

pub use frequency_window::FrequencyWindow;
pub use ghost_history::GhostHistory;
pub use partition::{AdaptivePartitioner, Partition};
pub use segment::{Segment, SegmentKind};

/// TinyLFU + segmented LRU with ghost-driven probation sizing.
///
/// # Update protocol
/// Each access first refreshes the sliding window, then the first matching
/// rule applies:
/// 1. protected hit: move to MRU
/// 2. probation hit: promote to protected MRU
/// 3. ghost hit: grow probation, admit straight into protected
/// 4. otherwise: admit to probation if the window count is at least 2,
///    then count the access toward the periodic re-partition
#[derive(Debug)]
pub struct TinyLfuSlru {
    capacity: usize,
    window: FrequencyWindow,
    probation: Segment,
    protected: Segment,
    ghost: GhostHistory,
    partitioner: AdaptivePartitioner,
}

impl TinyLfuSlru {
    /// Create a policy for a cache of `capacity` blocks.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `capacity < 2` (each segment needs a slot)
    ///   or any tuning value is out of range
    pub fn new(capacity: usize, config: &TinyLfuConfig) -> Result<Self> {
        if capacity < 2 {
            return Err(Error::InvalidConfig(format!(
                "tiny-lfu needs a capacity of at least 2, got {}",
                capacity
            )));
        }
        config.validate()?;

        let partitioner = AdaptivePartitioner::new(
            capacity,
            config.init_prob_fraction,
            config.adjust_step,
            config.adjust_interval,
        );
        let partition = partitioner.partition();

        Ok(Self {
            capacity,
            window: FrequencyWindow::new(config.freq_window),
            probation: Segment::new(SegmentKind::Probation, partition.prob_size),
            protected: Segment::new(SegmentKind::Protected, partition.prot_size),
            ghost: GhostHistory::new(partition.prob_size),
            partitioner,
        })
    }

    /// Create a policy with default tuning.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, &TinyLfuConfig::default())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn partition(&self) -> Partition {
        self.partitioner.partition()
    }

    pub fn prob_fraction(&self) -> f64 {
        self.partitioner.prob_fraction()
    }

    /// Accesses to `block` within the sliding window.
    pub fn window_frequency(&self, block: BlockId) -> u32 {
        self.window.count(block)
    }

    /// Segment currently tracking `block`, if any.
    pub fn segment_of(&self, block: BlockId) -> Option<SegmentKind> {
        if self.protected.contains(block) {
            Some(SegmentKind::Protected)
        } else if self.probation.contains(block) {
            Some(SegmentKind::Probation)
        } else {
            None
        }
    }

    pub fn in_ghost(&self, block: BlockId) -> bool {
        self.ghost.contains(block)
    }

    pub fn probation_len(&self) -> usize {
        self.probation.len()
    }

    pub fn protected_len(&self) -> usize {
        self.protected.len()
    }

    pub fn ghost_len(&self) -> usize {
        self.ghost.len()
    }

    /// Insert `block` as protected MRU, dropping the protected LRU block
    /// first if the segment is full.
    ///
    /// The dropped block is not demoted anywhere. It may still be cached
    /// by the caller, where only the eviction fallback can find it.
    fn admit_protected(&mut self, block: BlockId) {
        while self.protected.is_full() {
            match self.protected.pop_oldest() {
                Some(dropped) => trace!(block = %dropped, "protected full, lru dropped"),
                None => break,
            }
        }
        self.protected.touch(block);
    }

    /// Append `block` to probation, pushing the FIFO head into the ghost
    /// history when full.
    fn admit_probation(&mut self, block: BlockId) {
        while self.probation.is_full() {
            match self.probation.pop_oldest() {
                Some(old) => self.ghost.record(old),
                None => break,
            }
        }
        self.probation.push_newest(block);
    }

    /// Resize segments and ghost history to `partition`, trimming overflow
    /// the same way admissions do.
    fn apply_partition(&mut self, partition: Partition) {
        self.probation.set_capacity(partition.prob_size);
        self.protected.set_capacity(partition.prot_size);
        self.ghost.resize(partition.prob_size);

        while self.probation.is_over() {
            match self.probation.pop_oldest() {
                Some(old) => self.ghost.record(old),
                None => break,
            }
        }
        while self.protected.is_over() {
            if self.protected.pop_oldest().is_none() {
                break;
            }
        }
        debug!(%partition, "repartitioned");
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        use crate::common::config::{MAX_PROB_FRACTION, MIN_PROB_FRACTION};

        let partition = self.partition();
        assert!(partition.prob_size >= 1);
        assert_eq!(partition.prob_size + partition.prot_size, self.capacity);
        assert!(partition.prob_fraction >= MIN_PROB_FRACTION);
        assert!(partition.prob_fraction <= MAX_PROB_FRACTION);

        assert_eq!(self.probation.capacity(), partition.prob_size);
        assert_eq!(self.protected.capacity(), partition.prot_size);
        assert!(self.probation.len() <= partition.prob_size);
        assert!(self.protected.len() <= partition.prot_size);
        assert_eq!(self.ghost.capacity(), partition.prob_size);
        assert!(self.ghost.len() <= self.ghost.capacity());

        for &block in self.probation.iter() {
            assert!(!self.protected.contains(block), "{} in both segments", block);
            assert!(!self.ghost.contains(block), "{} in probation and ghost", block);
        }
        for &block in self.protected.iter() {
            assert!(!self.ghost.contains(block), "{} in protected and ghost", block);
        }

        self.window.debug_validate_invariants();
    }
}

impl EvictionPolicy for TinyLfuSlru {
    fn name(&self) -> &'static str {
        "tiny-lfu"
    }

    fn update(&mut self, block: BlockId, _was_hit: bool) {
        let freq = self.window.record(block);

        if self.protected.contains(block) {
            self.protected.touch(block);
            return;
        }

        if self.probation.remove(block) {
            trace!(%block, "promoted to protected");
            self.admit_protected(block);
            return;
        }

        if self.ghost.remove(block) {
            let partition = self.partitioner.on_ghost_hit();
            debug!(%block, fraction = partition.prob_fraction, "ghost hit");
            self.apply_partition(partition);
            self.admit_protected(block);
            return;
        }

        if freq >= ADMISSION_THRESHOLD {
            trace!(%block, freq, "admitted to probation");
            self.admit_probation(block);
        }

        if let Some(partition) = self.partitioner.on_access() {
            self.apply_partition(partition);
        }
    }

    fn evict(&mut self, candidates: &BlockSet) -> Result<BlockId> {
        if candidates.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }
        if let Some(victim) = self.probation.take_oldest_in(candidates) {
            return Ok(victim);
        }
        if let Some(victim) = self.protected.take_oldest_in(candidates) {
            return Ok(victim);
        }
        trace!("no tracked block is cached, evicting an untracked one");
        any_candidate(candidates)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::common::config::{MAX_PROB_FRACTION, MIN_PROB_FRACTION};
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Update(u64),
        Evict(Vec<u64>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (1u64..40).prop_map(Op::Update),
            1 => prop::collection::vec(1u64..40, 1..8).prop_map(Op::Evict),
        ]
    }

    proptest! {
        /// Segment bounds, partition sum and mutual exclusion hold after
        /// any operation sequence.
        #[test]
        fn prop_invariants_hold(
            capacity in 2usize..24,
            fraction in 0.05f64..=0.5,
            window in 1usize..64,
            interval in 1u64..32,
            ops in prop::collection::vec(op_strategy(), 0..300)
        ) {
            let config = TinyLfuConfig {
                init_prob_fraction: fraction,
                freq_window: window,
                adjust_interval: interval,
                adjust_step: 0.05,
            };
            let mut policy = TinyLfuSlru::new(capacity, &config).unwrap();

            for op in ops {
                match op {
                    Op::Update(id) => policy.update(BlockId::new(id), false),
                    Op::Evict(ids) => {
                        let candidates: BlockSet = ids.into_iter().map(BlockId::new).collect();
                        let victim = policy.evict(&candidates).unwrap();
                        prop_assert!(candidates.contains(&victim));
                    }
                }
                policy.debug_validate_invariants();
                let p = policy.partition();
                prop_assert!(p.prob_fraction >= MIN_PROB_FRACTION);
                prop_assert!(p.prob_fraction <= MAX_PROB_FRACTION);
            }
        }

        /// A block seen once in the window is never tracked right after
        /// its update, unless it was already tracked or a ghost.
        #[test]
        fn prop_single_access_not_admitted(
            ids in prop::collection::vec(1u64..30, 1..200)
        ) {
            let mut policy = TinyLfuSlru::new(8, &TinyLfuConfig::default()).unwrap();
            for id in ids {
                let block = BlockId::new(id);
                let was_known = policy.segment_of(block).is_some() || policy.in_ghost(block);
                policy.update(block, false);
                if !was_known && policy.window_frequency(block) == 1 {
                    prop_assert_eq!(policy.segment_of(block), None);
                }
            }
        }

        /// Every ghost hit leaves the fraction strictly larger or at the cap.
        #[test]
        fn prop_ghost_hit_never_shrinks(
            ids in prop::collection::vec(1u64..20, 1..300)
        ) {
            let mut policy = TinyLfuSlru::new(10, &TinyLfuConfig::default()).unwrap();
            for id in ids {
                let block = BlockId::new(id);
                let ghost_hit = policy.in_ghost(block);
                let before = policy.prob_fraction();
                policy.update(block, false);
                if ghost_hit {
                    let after = policy.prob_fraction();
                    prop_assert!(after > before || after == MAX_PROB_FRACTION);
                }
            }
        }
    }
}
