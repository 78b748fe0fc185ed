//! In-flight attempt tracking
//!
//! The pending set is the dedup gate in front of the launcher: a dispatch
//! only proceeds if it claims its key here first. Claims are held for the
//! lifetime of one unit of work and released through [`PendingClaim`] when
//! the unit finishes, whichever way it exits.
//!
//! Critical sections are O(1) hash set operations. No I/O, handler calls,
//! or logging happen under the lock.

use crate::domain::key::AuthKey;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Mutually-exclusive marker set for in-flight authentications.
pub struct PendingAuthSet {
    pending: Mutex<HashSet<AuthKey>>,
}

impl PendingAuthSet {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Atomically claim a key.
    ///
    /// Returns false when an attempt for this key is already in flight.
    pub fn try_claim(&self, key: AuthKey) -> bool {
        self.pending.lock().insert(key)
    }

    /// Release a key. Releasing a key that is not claimed is a no-op.
    pub fn release(&self, key: AuthKey) {
        self.pending.lock().remove(&key);
    }

    /// Claim a key and tie the release to the returned guard.
    ///
    /// Returns `None` when an attempt for this key is already in flight.
    pub fn claim(set: &Arc<Self>, key: AuthKey) -> Option<PendingClaim> {
        if set.try_claim(key) {
            Some(PendingClaim {
                set: Arc::clone(set),
                key,
            })
        } else {
            None
        }
    }

    pub fn contains(&self, key: &AuthKey) -> bool {
        self.pending.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl Default for PendingAuthSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Claim on one key, released exactly once on drop.
pub struct PendingClaim {
    set: Arc<PendingAuthSet>,
    key: AuthKey,
}

impl PendingClaim {
    pub fn key(&self) -> AuthKey {
        self.key
    }
}

impl Drop for PendingClaim {
    fn drop(&mut self) {
        self.set.release(self.key);
    }
}
