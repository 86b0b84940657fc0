//! Simulation statistics tracking.

use std::fmt;

/// Counters kept by the [`CacheSimulator`](crate::sim::CacheSimulator).
///
/// Only primary accesses count toward `hits` and `misses`. Prefetches are
/// tracked separately so they never move the hit rate.
///
/// # Example
/// ```
/// use cachesim::SimStats;
///
/// let stats = SimStats { hits: 7, misses: 3, ..SimStats::default() };
/// assert_eq!(stats.hit_rate(), 0.7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Primary accesses that found their block cached.
    pub hits: u64,

    /// Primary accesses that had to load their block.
    pub misses: u64,

    /// Blocks removed to make room, for any reason.
    pub evictions: u64,

    /// Prefetched blocks brought into the cache.
    pub prefetches: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary accesses seen.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, misses: {}, evictions: {}, prefetches: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.misses,
            self.evictions,
            self.prefetches,
            self.hit_rate() * 100.0
        )
    }
}
