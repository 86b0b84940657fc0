//! Eviction policy implementations.
//!
//! Every policy implements [`EvictionPolicy`]: the harness reports each
//! access through `update` and asks for a victim through `evict` when the
//! cache is full.
//!
//! Implemented:
//! - [`LruPolicy`] - strict least-recently-used (baseline)
//! - [`LfuDecayPolicy`] - least-frequently-used with periodic decay
//! - [`TinyLfuSlru`] - TinyLFU admission in front of an adaptive segmented LRU
//!
//! The concrete policy is picked once per run through [`PolicyKind::build`].

mod lfu_decay;
mod lru;
mod shared;
pub mod tiny_lfu;

use std::fmt;
use std::str::FromStr;

use crate::common::config::PolicySettings;
use crate::common::{BlockId, BlockSet, Error, Result};

pub use lfu_decay::LfuDecayPolicy;
pub use lru::LruPolicy;
pub use shared::SharedPolicy;
pub use tiny_lfu::{Partition, SegmentKind, TinyLfuSlru};

/// A block replacement strategy.
///
/// Policies only track metadata. They never remove anything from the
/// caller's cache; the caller removes whatever `evict` returns.
pub trait EvictionPolicy: Send {
    /// Short display name.
    fn name(&self) -> &'static str;

    /// Record an access to `block`.
    ///
    /// Called for every access, including prefetches that the caller does
    /// not count as hits or misses.
    fn update(&mut self, block: BlockId, was_hit: bool);

    /// Pick a victim among the blocks currently cached.
    ///
    /// # Errors
    /// - `Error::EmptyCandidateSet` if `candidates` is empty
    fn evict(&mut self, candidates: &BlockSet) -> Result<BlockId>;
}

impl<P: EvictionPolicy + ?Sized> EvictionPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn update(&mut self, block: BlockId, was_hit: bool) {
        (**self).update(block, was_hit)
    }

    fn evict(&mut self, candidates: &BlockSet) -> Result<BlockId> {
        (**self).evict(candidates)
    }
}

/// The available policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Lru,
    LfuDecay,
    TinyLfu,
}

impl PolicyKind {
    /// Every variant, in report order.
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Lru, PolicyKind::LfuDecay, PolicyKind::TinyLfu];

    /// Construct a policy of this kind for a cache of `capacity` blocks.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if the settings are out of range for this
    ///   kind (TinyLFU also needs `capacity >= 2`)
    pub fn build(
        self,
        capacity: usize,
        settings: &PolicySettings,
    ) -> Result<Box<dyn EvictionPolicy>> {
        let policy: Box<dyn EvictionPolicy> = match self {
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::LfuDecay => Box::new(LfuDecayPolicy::with_config(&settings.lfu_decay)?),
            PolicyKind::TinyLfu => Box::new(TinyLfuSlru::new(capacity, &settings.tiny_lfu)?),
        };
        Ok(policy)
    }

    /// Name used in reports.
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Lru => "LRU (baseline)",
            PolicyKind::LfuDecay => "LFU-Decay",
            PolicyKind::TinyLfu => "TinyLFU+SLRU",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Lru => "lru",
            PolicyKind::LfuDecay => "lfu-decay",
            PolicyKind::TinyLfu => "tiny-lfu",
        };
        f.write_str(name)
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(PolicyKind::Lru),
            "lfu-decay" | "lfu_decay" | "lfu" => Ok(PolicyKind::LfuDecay),
            "tiny-lfu" | "tiny_lfu" | "tinylfu" => Ok(PolicyKind::TinyLfu),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// Returns the first candidate in iteration order.
pub(crate) fn any_candidate(candidates: &BlockSet) -> Result<BlockId> {
    candidates
        .iter()
        .next()
        .copied()
        .ok_or(Error::EmptyCandidateSet)
}
