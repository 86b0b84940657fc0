//! LFU with periodic decay.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::common::config::LfuDecayConfig;
use crate::common::{BlockId, BlockSet, Error, Result};
use crate::policy::EvictionPolicy;

/// Least-frequently-used eviction with aging.
///
/// Every access adds 1 to the block's frequency. Every `decay_interval`
/// updates, all tracked frequencies are multiplied by `decay_factor`, so old
/// popularity fades instead of pinning a block forever.
///
/// The victim is the candidate with the smallest frequency (untracked
/// candidates count as 0). Ties go to whichever candidate the set yields
/// first; callers must not rely on a particular one. The victim's history
/// is dropped, so a re-admitted block starts over from 0.
#[derive(Debug)]
pub struct LfuDecayPolicy {
    freqs: FxHashMap<BlockId, f64>,
    counter: u64,
    decay_interval: u64,
    decay_factor: f64,
}

impl LfuDecayPolicy {
    /// Create a policy with the default decay schedule.
    pub fn new() -> Self {
        Self::from_validated(&LfuDecayConfig::default())
    }

    /// Create a policy with a custom decay schedule.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `decay_interval` is 0 or `decay_factor`
    ///   is outside `(0, 1]`
    pub fn with_config(config: &LfuDecayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &LfuDecayConfig) -> Self {
        Self {
            freqs: FxHashMap::default(),
            counter: 0,
            decay_interval: config.decay_interval,
            decay_factor: config.decay_factor,
        }
    }

    /// Current (decayed) frequency of `block`; 0 if untracked.
    pub fn frequency(&self, block: BlockId) -> f64 {
        self.freqs.get(&block).copied().unwrap_or(0.0)
    }

    /// Number of blocks with a frequency entry.
    pub fn tracked(&self) -> usize {
        self.freqs.len()
    }

    fn decay(&mut self) {
        for freq in self.freqs.values_mut() {
            *freq *= self.decay_factor;
        }
        debug!(
            tracked = self.freqs.len(),
            factor = self.decay_factor,
            "lfu frequencies decayed"
        );
    }
}

impl Default for LfuDecayPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for LfuDecayPolicy {
    fn name(&self) -> &'static str {
        "lfu-decay"
    }

    fn update(&mut self, block: BlockId, _was_hit: bool) {
        *self.freqs.entry(block).or_insert(0.0) += 1.0;
        self.counter += 1;
        if self.counter % self.decay_interval == 0 {
            self.decay();
        }
    }

    fn evict(&mut self, candidates: &BlockSet) -> Result<BlockId> {
        let mut victim: Option<(BlockId, f64)> = None;
        for &block in candidates {
            let freq = self.frequency(block);
            match victim {
                Some((_, best)) if freq >= best => {}
                _ => victim = Some((block, freq)),
            }
        }

        let (block, _) = victim.ok_or(Error::EmptyCandidateSet)?;
        self.freqs.remove(&block);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u64]) -> BlockSet {
        ids.iter().copied().map(BlockId::new).collect()
    }

    fn policy(decay_interval: u64, decay_factor: f64) -> LfuDecayPolicy {
        LfuDecayPolicy::with_config(&LfuDecayConfig {
            decay_interval,
            decay_factor,
        })
        .unwrap()
    }

    #[test]
    fn test_evicts_least_frequent() {
        let mut lfu = LfuDecayPolicy::new();
        for _ in 0..3 {
            lfu.update(BlockId::new(1), true);
        }
        lfu.update(BlockId::new(2), false);
        lfu.update(BlockId::new(2), true);
        lfu.update(BlockId::new(3), false);

        assert_eq!(lfu.evict(&set(&[1, 2, 3])).unwrap(), BlockId::new(3));
        assert_eq!(lfu.evict(&set(&[1, 2])).unwrap(), BlockId::new(2));
    }

    #[test]
    fn test_untracked_candidate_counts_as_zero() {
        let mut lfu = LfuDecayPolicy::new();
        lfu.update(BlockId::new(1), false);

        assert_eq!(lfu.evict(&set(&[1, 9])).unwrap(), BlockId::new(9));
    }

    #[test]
    fn test_decay_halves_after_interval() {
        let mut lfu = policy(2, 0.5);
        lfu.update(BlockId::new(1), false);
        assert_eq!(lfu.frequency(BlockId::new(1)), 1.0);

        // Two unrelated updates; the second one triggers the sweep.
        lfu.update(BlockId::new(2), false);
        lfu.update(BlockId::new(3), false);

        assert_eq!(lfu.frequency(BlockId::new(1)), 0.5);
        assert_eq!(lfu.frequency(BlockId::new(2)), 0.5);
        assert_eq!(lfu.frequency(BlockId::new(3)), 1.0);
    }

    #[test]
    fn test_decay_is_multiplicative_not_reset() {
        let mut lfu = policy(1, 0.5);
        lfu.update(BlockId::new(1), false); // 1 -> 0.5
        lfu.update(BlockId::new(1), false); // 1.5 -> 0.75
        assert_eq!(lfu.frequency(BlockId::new(1)), 0.75);
    }

    #[test]
    fn test_eviction_forgets_history() {
        let mut lfu = LfuDecayPolicy::new();
        for _ in 0..5 {
            lfu.update(BlockId::new(1), false);
        }
        assert_eq!(lfu.evict(&set(&[1])).unwrap(), BlockId::new(1));
        assert_eq!(lfu.frequency(BlockId::new(1)), 0.0);
        assert_eq!(lfu.tracked(), 0);

        lfu.update(BlockId::new(1), false);
        assert_eq!(lfu.frequency(BlockId::new(1)), 1.0);
    }

    #[test]
    fn test_tie_selects_a_minimum() {
        let mut lfu = LfuDecayPolicy::new();
        lfu.update(BlockId::new(1), false);
        lfu.update(BlockId::new(2), false);
        lfu.update(BlockId::new(3), false);
        lfu.update(BlockId::new(3), false);

        let victim = lfu.evict(&set(&[1, 2, 3])).unwrap();
        assert!(victim == BlockId::new(1) || victim == BlockId::new(2));
    }

    #[test]
    fn test_invalid_config() {
        let zero_interval = LfuDecayConfig {
            decay_interval: 0,
            decay_factor: 0.5,
        };
        assert!(matches!(
            LfuDecayPolicy::with_config(&zero_interval),
            Err(Error::InvalidConfig(_))
        ));

        let bad_factor = LfuDecayConfig {
            decay_interval: 10,
            decay_factor: 1.5,
        };
        assert!(LfuDecayPolicy::with_config(&bad_factor).is_err());
    }

    #[test]
    fn test_empty_candidates() {
        let mut lfu = LfuDecayPolicy::new();
        assert!(matches!(lfu.evict(&BlockSet::default()), Err(Error::EmptyCandidateSet)));
    }
}
