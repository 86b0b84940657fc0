//! Insertion- or recency-ordered set of keys.
//!
//! An [`IntrusiveList`] holds the order and a hash index maps each key to
//! its node, giving O(1) membership, removal and move-to-back.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        list: IntrusiveList<K>
//!   ┌─────────┬─────────┐              front ─► [A] ◄──► [B] ◄──► [C] ◄── back
//!   │  key A  │  id_1   │                oldest                   newest
//!   │  key B  │  id_2   │
//!   └─────────┴─────────┘
//! ```
//!
//! Used as a FIFO (probation, ghost history) when keys are only appended,
//! and as an LRU (protected segment, LRU policy) when hits call
//! [`LinkedSet::touch`].

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, Iter};
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
pub struct LinkedSet<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> LinkedSet<K>
where
    K: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Oldest key.
    pub fn front(&self) -> Option<&K> {
        self.list.front()
    }

    /// Appends `key` at the back. Returns `false` (and leaves the order
    /// untouched) if it was already present.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.list.push_back(key);
        self.index.insert(key, id);
        true
    }

    /// Moves `key` to the back, inserting it if absent.
    pub fn touch(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&id) => {
                self.list.move_to_back(id);
            }
            None => {
                self.push_back(key);
            }
        }
    }

    /// Removes and returns the oldest key.
    pub fn pop_front(&mut self) -> Option<K> {
        let key = self.list.pop_front()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.list.remove(id);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the oldest key for which `pred` holds.
    pub fn remove_first_where<F>(&mut self, mut pred: F) -> Option<K>
    where
        F: FnMut(&K) -> bool,
    {
        let key = *self.list.iter().find(|key| pred(key))?;
        self.remove(&key);
        Some(key)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> Iter<'_, K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.list.len(), self.index.len());
        for key in self.list.iter() {
            assert!(self.index.contains_key(key));
        }
    }
}

impl<K> Default for LinkedSet<K>
where
    K: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
