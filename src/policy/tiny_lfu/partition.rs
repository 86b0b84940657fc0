//! Adaptive split of the cache between probation and protected.

use std::fmt;

use tracing::debug;

use crate::common::config::{GHOST_HIT_RATE_THRESHOLD, MAX_PROB_FRACTION, MIN_PROB_FRACTION};

/// Segment sizes derived from `prob_fraction`.
///
/// `prob_size + prot_size == capacity` and `prob_size >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partition {
    pub prob_fraction: f64,
    pub prob_size: usize,
    pub prot_size: usize,
}

impl Partition {
    /// Split `capacity` so probation gets `floor(capacity * prob_fraction)`
    /// slots (at least one) and protected gets the rest.
    pub fn for_fraction(capacity: usize, prob_fraction: f64) -> Self {
        let prob_size = ((capacity as f64 * prob_fraction).floor() as usize)
            .max(1)
            .min(capacity.max(1));
        Self {
            prob_fraction,
            prob_size,
            prot_size: capacity.saturating_sub(prob_size),
        }
    }

    pub fn capacity(&self) -> usize {
        self.prob_size + self.prot_size
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Partition {{ fraction: {:.2}, probation: {}, protected: {} }}",
            self.prob_fraction, self.prob_size, self.prot_size
        )
    }
}

/// Tunes `prob_fraction` from ghost-hit feedback.
///
/// A ghost hit grows probation by one step straight away. Every
/// `adjust_interval` counted accesses the ghost-hit rate over that interval
/// is checked, and probation shrinks by one step when it fell below 10%.
/// The fraction stays within `[0.05, 0.5]`.
#[derive(Debug)]
pub struct AdaptivePartitioner {
    capacity: usize,
    partition: Partition,
    adjust_step: f64,
    adjust_interval: u64,
    accesses: u64,
    ghost_hits: u64,
}

impl AdaptivePartitioner {
    pub fn new(capacity: usize, init_fraction: f64, adjust_step: f64, adjust_interval: u64) -> Self {
        let fraction = init_fraction.clamp(MIN_PROB_FRACTION, MAX_PROB_FRACTION);
        Self {
            capacity,
            partition: Partition::for_fraction(capacity, fraction),
            adjust_step,
            adjust_interval: adjust_interval.max(1),
            accesses: 0,
            ghost_hits: 0,
        }
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn prob_fraction(&self) -> f64 {
        self.partition.prob_fraction
    }

    /// `(accesses, ghost_hits)` since the last reset.
    pub fn counters(&self) -> (u64, u64) {
        (self.accesses, self.ghost_hits)
    }

    /// Grow probation after a ghost hit and return the new partition.
    pub fn on_ghost_hit(&mut self) -> Partition {
        self.ghost_hits += 1;
        let grown = (self.partition.prob_fraction + self.adjust_step).min(MAX_PROB_FRACTION);
        self.set_fraction(grown);
        self.partition
    }

    /// Count an access; at the end of an interval, maybe shrink probation.
    ///
    /// Returns the new partition when the fraction was re-evaluated.
    pub fn on_access(&mut self) -> Option<Partition> {
        self.accesses += 1;
        if self.accesses < self.adjust_interval {
            return None;
        }

        let rate = self.ghost_hits as f64 / self.accesses as f64;
        let shrink = rate < GHOST_HIT_RATE_THRESHOLD;
        if shrink {
            let shrunk = (self.partition.prob_fraction - self.adjust_step).max(MIN_PROB_FRACTION);
            self.set_fraction(shrunk);
        }
        debug!(
            ghost_hit_rate = rate,
            shrink,
            partition = %self.partition,
            "probation re-evaluated"
        );

        self.accesses = 0;
        self.ghost_hits = 0;
        shrink.then_some(self.partition)
    }

    fn set_fraction(&mut self, fraction: f64) {
        self.partition = Partition::for_fraction(self.capacity, fraction);
    }
}
