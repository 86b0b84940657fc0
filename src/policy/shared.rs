//! Thread-safe handle around a single policy instance.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::{BlockId, BlockSet, Result};
use crate::policy::EvictionPolicy;

/// A policy behind one mutex, cloneable across threads.
///
/// Policies are single-threaded; this wraps one instance so several callers
/// can drive it. Each call holds the lock for exactly one `update` or
/// `evict`, so calls are serialized but never interleaved.
#[derive(Clone)]
pub struct SharedPolicy {
    inner: Arc<Mutex<Box<dyn EvictionPolicy>>>,
}

impl SharedPolicy {
    pub fn new(policy: Box<dyn EvictionPolicy>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(policy)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.lock().name()
    }

    pub fn update(&self, block: BlockId, was_hit: bool) {
        self.inner.lock().update(block, was_hit);
    }

    pub fn evict(&self, candidates: &BlockSet) -> Result<BlockId> {
        self.inner.lock().evict(candidates)
    }
}
