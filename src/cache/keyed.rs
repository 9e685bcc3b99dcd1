//! Memoizing cache with per-key mutual exclusion
//!
//! Wraps expensive, idempotent remote fetches so that concurrent callers
//! asking for the same key share one in-flight computation instead of issuing
//! duplicate remote calls. Entries never expire; invalidation is manual and
//! per full key.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tracing::trace;

/// One slot per distinct key. The slot's mutex serializes computation and
/// result visibility for that key; slots are created lazily and kept for the
/// lifetime of the cache, which is bounded by the key space a single
/// interactive session actually queries.
struct Slot<V> {
    value: Mutex<Option<V>>,
}

/// Memoizing cache keyed by the wrapped computation's arguments.
///
/// The outer map lock is held only to look up or create a slot, so a caller
/// computing under one key never blocks callers on other keys.
pub struct KeyedCache<K, V> {
    slots: Mutex<HashMap<K, Arc<Slot<V>>>>,
}

impl<K, V> KeyedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the value for `key`, computing it with `compute` on first
    /// access.
    ///
    /// At most one concurrent caller runs `compute` for a given key; the
    /// others block on the key's lock and then reread the populated entry
    /// without invoking their own closure. If `compute` fails the entry is
    /// left unpopulated, the error propagates, and the next caller retries.
    pub fn get_with<E>(&self, key: K, compute: impl FnOnce() -> Result<V, E>) -> Result<V, E> {
        let slot = self.slot(key);
        let mut value = slot.value.lock().unwrap();
        if let Some(cached) = value.as_ref() {
            trace!("Key cache HIT");
            return Ok(cached.clone());
        }
        trace!("Key cache MISS, computing");
        let fresh = compute()?;
        *value = Some(fresh.clone());
        Ok(fresh)
    }

    /// Recompute and store the value for `key` regardless of prior state,
    /// holding the key's lock across the computation.
    pub fn refresh_with<E>(&self, key: K, compute: impl FnOnce() -> Result<V, E>) -> Result<V, E> {
        let slot = self.slot(key);
        let mut value = slot.value.lock().unwrap();
        let fresh = compute()?;
        *value = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drop the stored value for `key`. The key's slot stays allocated.
    pub fn invalidate(&self, key: &K) {
        let slot = self.slots.lock().unwrap().get(key).cloned();
        if let Some(slot) = slot {
            *slot.value.lock().unwrap() = None;
            trace!("Key cache entry invalidated");
        }
    }

    /// Look up or lazily create the slot for `key`.
    fn slot(&self, key: K) -> Arc<Slot<V>> {
        let mut slots = self.slots.lock().unwrap();
        Arc::clone(slots.entry(key).or_insert_with(|| {
            Arc::new(Slot {
                value: Mutex::new(None),
            })
        }))
    }
}

impl<K, V> Default for KeyedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
