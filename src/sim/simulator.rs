//! Cache simulator - replays accesses against an eviction policy.
//!
//! The [`CacheSimulator`] provides:
//! - A bounded set of cached blocks
//! - Hit/miss accounting for primary accesses
//! - Next-block prefetch routed through the same policy
//! - Pluggable eviction policies

use tracing::trace;

use crate::common::{BlockId, BlockSet, Error, Result};
use crate::policy::EvictionPolicy;
use crate::sim::SimStats;

/// A fixed-capacity block cache driven by an [`EvictionPolicy`].
///
/// # Access flow
/// ```text
///   access(b) ──► hit?  ── yes ──► hits += 1, policy.update(b, true)
///                  │
///                  no ──► misses += 1, make_room(), insert b, policy.update(b, false)
///                  │
///                  ▼
///   prefetch p = (b mod n_blocks) + 1, if not cached:
///                  make_room(), insert p, policy.update(p, false)   (not counted)
/// ```
///
/// The policy is always asked for a victim before an insert into a full
/// cache, so the cache never holds more than `capacity` blocks.
///
/// # Usage
/// ```
/// use cachesim::policy::LruPolicy;
/// use cachesim::{BlockId, CacheSimulator};
///
/// let mut sim = CacheSimulator::new(2, LruPolicy::new(), 100).with_prefetch(false);
/// for id in [1, 2, 3, 1] {
///     sim.access(BlockId::new(id)).unwrap();
/// }
/// assert_eq!(sim.stats().misses, 4);
/// ```
pub struct CacheSimulator<P> {
    /// Blocks currently held.
    cache: BlockSet,

    /// Eviction policy for selecting victims.
    policy: P,

    /// Performance statistics.
    stats: SimStats,

    /// Maximum number of cached blocks (immutable after construction).
    capacity: usize,

    /// Size of the id space, for prefetch wrap-around.
    n_blocks: u64,

    prefetch: bool,
}

impl<P: EvictionPolicy> CacheSimulator<P> {
    /// Create a new simulator with prefetch enabled.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize, policy: P, n_blocks: u64) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            cache: BlockSet::with_capacity_and_hasher(capacity + 1, Default::default()),
            policy,
            stats: SimStats::new(),
            capacity,
            n_blocks,
            prefetch: true,
        }
    }

    /// Enable or disable the next-block prefetch.
    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    // ========================================================================
    // Public API: Accesses
    // ========================================================================

    /// Access `block`, returning whether it was a hit.
    ///
    /// # Errors
    /// - `Error::EmptyCandidateSet` / `Error::VictimNotCached` if the policy
    ///   fails to produce a cached victim when one is needed
    pub fn access(&mut self, block: BlockId) -> Result<bool> {
        let hit = if self.cache.contains(&block) {
            self.stats.hits += 1;
            self.policy.update(block, true);
            true
        } else {
            self.stats.misses += 1;
            self.load(block)?;
            false
        };

        if self.prefetch {
            let next = block.next_in(self.n_blocks);
            if !self.cache.contains(&next) {
                trace!(block = %next, "prefetch");
                self.stats.prefetches += 1;
                self.load(next)?;
            }
        }

        Ok(hit)
    }

    /// Replay every block of `workload`.
    pub fn run<I>(&mut self, workload: I) -> Result<()>
    where
        I: IntoIterator<Item = BlockId>,
    {
        for block in workload {
            self.access(block)?;
        }
        Ok(())
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of blocks currently cached.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn contains(&self, block: BlockId) -> bool {
        self.cache.contains(&block)
    }

    pub fn cached_blocks(&self) -> &BlockSet {
        &self.cache
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Consume the simulator, returning the policy and final stats.
    pub fn into_parts(self) -> (P, SimStats) {
        (self.policy, self.stats)
    }

    // ========================================================================
    // Internal: Admission and eviction
    // ========================================================================

    /// Insert `block` as a miss, evicting first if full.
    fn load(&mut self, block: BlockId) -> Result<()> {
        if self.cache.len() >= self.capacity {
            self.evict_one()?;
        }
        self.cache.insert(block);
        self.policy.update(block, false);
        Ok(())
    }

    /// Ask the policy for a victim and remove it.
    fn evict_one(&mut self) -> Result<BlockId> {
        let victim = self.policy.evict(&self.cache)?;
        if !self.cache.remove(&victim) {
            return Err(Error::VictimNotCached(victim));
        }
        self.stats.evictions += 1;
        trace!(block = %victim, "evicted");
        Ok(victim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::TinyLfuConfig;
    use crate::policy::{LfuDecayPolicy, LruPolicy, TinyLfuSlru};

    fn b(id: u64) -> BlockId {
        BlockId::new(id)
    }

    /// Policy that always names a block the cache does not hold.
    struct Liar;

    impl EvictionPolicy for Liar {
        fn name(&self) -> &'static str {
            "liar"
        }

        fn update(&mut self, _block: BlockId, _was_hit: bool) {}

        fn evict(&mut self, _candidates: &BlockSet) -> Result<BlockId> {
            Ok(BlockId::new(u64::MAX))
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let mut sim = CacheSimulator::new(4, LruPolicy::new(), 100).with_prefetch(false);

        assert!(!sim.access(b(1)).unwrap());
        assert!(sim.access(b(1)).unwrap());

        let stats = sim.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(sim.hit_rate(), 0.5);
    }

    #[test]
    fn test_lru_scenario() {
        let mut sim = CacheSimulator::new(2, LruPolicy::new(), 100).with_prefetch(false);

        sim.run([b(1), b(2), b(3)]).unwrap();
        // Block 1 was least recent when 3 arrived.
        assert!(!sim.contains(b(1)));

        sim.access(b(1)).unwrap();
        let stats = sim.stats();
        assert_eq!(stats.misses, 4);
        assert_eq!(stats.hits, 0);
        assert_eq!(sim.hit_rate(), 0.0);

        let expected: BlockSet = [b(3), b(1)].into_iter().collect();
        assert_eq!(sim.cached_blocks(), &expected);
    }

    #[test]
    fn test_prefetch_loads_next_block() {
        let mut sim = CacheSimulator::new(4, LruPolicy::new(), 10);
        sim.access(b(3)).unwrap();
        assert!(sim.contains(b(4)));

        // Prefetch wraps around the id space.
        sim.access(b(10)).unwrap();
        assert!(sim.contains(b(1)));

        // The prefetched block now hits.
        assert!(sim.access(b(4)).unwrap());

        let stats = sim.stats();
        assert_eq!(stats.accesses(), 3);
        assert_eq!(stats.prefetches, 3);
    }

    #[test]
    fn test_prefetch_skipped_when_cached() {
        let mut sim = CacheSimulator::new(4, LruPolicy::new(), 10);
        sim.access(b(2)).unwrap();
        sim.access(b(1)).unwrap();
        // Block 2 was already cached when 1's prefetch ran.
        assert_eq!(sim.stats().prefetches, 1);
        assert_eq!(sim.stats().hits, 0);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut sim = CacheSimulator::new(3, LfuDecayPolicy::new(), 50);
        for id in 1..=200u64 {
            sim.access(b(id * 7 % 50 + 1)).unwrap();
            assert!(sim.len() <= sim.capacity());
        }
        assert!(sim.stats().evictions > 0);
    }

    #[test]
    fn test_tiny_lfu_untracked_blocks_still_evictable() {
        let policy = TinyLfuSlru::new(2, &TinyLfuConfig::default()).unwrap();
        let mut sim = CacheSimulator::new(2, policy, 100).with_prefetch(false);

        // Every block is seen once, so the policy tracks none of them.
        sim.run((1..=10).map(b)).unwrap();
        assert_eq!(sim.len(), 2);
        assert_eq!(sim.policy().probation_len(), 0);
        assert_eq!(sim.stats().evictions, 8);
    }

    #[test]
    fn test_victim_not_cached_is_error() {
        let mut sim = CacheSimulator::new(1, Liar, 100).with_prefetch(false);
        sim.access(b(1)).unwrap();

        let result = sim.access(b(2));
        assert!(matches!(result, Err(Error::VictimNotCached(id)) if id == BlockId::new(u64::MAX)));
        assert_eq!(sim.len(), 1);
    }

    #[test]
    fn test_into_parts() {
        let mut sim = CacheSimulator::new(2, LruPolicy::new(), 100).with_prefetch(false);
        sim.access(b(1)).unwrap();
        let (policy, stats) = sim.into_parts();
        assert_eq!(policy.len(), 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        let _ = CacheSimulator::new(0, LruPolicy::new(), 100);
    }
}
