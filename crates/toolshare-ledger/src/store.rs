//! # In-Memory Record Store
//!
//! The key-value store and id counter each component owns. Hosts with a
//! durable backend hydrate these at startup; the core only needs ordered
//! lookup, insertion, and atomic read-validate-update.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

// -- Store --------------------------------------------------------------------

/// Thread-safe, cloneable, ordered key-value store.
///
/// Clones share the underlying map. The lock is `parking_lot` and therefore
/// non-poisoning; it is never held beyond a single method call.
#[derive(Debug)]
pub struct Store<K: Ord + Copy, V: Clone> {
    data: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K: Ord + Copy, V: Clone> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Ord + Copy, V: Clone> Store<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.data.write().insert(key, value)
    }

    /// Retrieve a record by key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    /// All records matching `pred`, in key order.
    pub fn filter(&self, pred: impl Fn(&V) -> bool) -> Vec<V> {
        self.data.read().values().filter(|v| pred(v)).cloned().collect()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure runs under the write lock and may inspect, validate, and
    /// mutate the record. Returns `None` if the key doesn't exist, otherwise
    /// the closure's result. The closure must leave the record untouched
    /// when it returns `Err`.
    pub fn try_update<R, E>(
        &self,
        key: &K,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(key).map(f)
    }

    /// Run `f` with exclusive access to the whole map.
    ///
    /// Used where a uniqueness check and the insert it guards must not be
    /// separated.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut BTreeMap<K, V>) -> R) -> R {
        f(&mut self.data.write())
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Ord + Copy, V: Clone> Default for Store<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Id Sequence --------------------------------------------------------------

/// Dense, 1-based id counter shared by clones.
///
/// Callers allocate only once every check for the new record has passed,
/// so a failed operation never leaves a gap.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: Arc<Mutex<u64>>,
}

impl IdSequence {
    /// A counter whose first allocation is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> u64 {
        let mut last = self.last.lock();
        *last += 1;
        *last
    }
}
