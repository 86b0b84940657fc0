//! Probation and protected segments.

use std::fmt;

use crate::common::{BlockId, BlockSet};
use crate::ds::{Iter, LinkedSet};

/// Which segment a block lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Admitted recently, not yet reused. FIFO ordered.
    Probation,
    /// Reused at least once since admission. Recency ordered.
    Protected,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Probation => f.write_str("probation"),
            SegmentKind::Protected => f.write_str("protected"),
        }
    }
}

/// One bounded region of the segmented LRU.
///
/// The oldest entry sits at the front. Probation only ever appends, which
/// makes it a FIFO; protected also calls [`Segment::touch`] on hits, which
/// makes it an LRU. Callers enforce the capacity: the segment reports
/// fullness but does not drop anything on its own.
#[derive(Debug)]
pub struct Segment {
    kind: SegmentKind,
    entries: LinkedSet<BlockId>,
    capacity: usize,
}

impl Segment {
    pub fn new(kind: SegmentKind, capacity: usize) -> Self {
        Self {
            kind,
            entries: LinkedSet::with_capacity(capacity),
            capacity,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` once the segment holds `capacity` or more entries.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// `true` while the segment holds more than `capacity` entries.
    pub fn is_over(&self) -> bool {
        self.entries.len() > self.capacity
    }

    pub fn contains(&self, block: BlockId) -> bool {
        self.entries.contains(&block)
    }

    /// Add `block` as the newest entry.
    pub fn push_newest(&mut self, block: BlockId) {
        self.entries.push_back(block);
    }

    /// Make `block` the newest entry, inserting it if absent.
    pub fn touch(&mut self, block: BlockId) {
        self.entries.touch(block);
    }

    /// Remove and return the oldest entry.
    pub fn pop_oldest(&mut self) -> Option<BlockId> {
        self.entries.pop_front()
    }

    pub fn remove(&mut self, block: BlockId) -> bool {
        self.entries.remove(&block)
    }

    /// Remove and return the oldest entry that is also in `candidates`.
    pub fn take_oldest_in(&mut self, candidates: &BlockSet) -> Option<BlockId> {
        self.entries.remove_first_where(|block| candidates.contains(block))
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> Iter<'_, BlockId> {
        self.entries.iter()
    }
}
