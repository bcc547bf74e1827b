//! First-in, first-out eviction scheme.
//!
//! Shares the LRU layout (hash index over an arena-backed list) but never
//! reorders on access: the list records insertion order only, so the tail is
//! always the oldest resident key. Updating a resident key keeps its slot.
//!
//! ```text
//!   insert D into full [C, B, A]   →   evict A   →   [D, C, B]
//!   get(B)                         →   [D, C, B]    (order unchanged)
//! ```

use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsSnapshotProvider, SchemeMetrics, SchemeMetricsRecorder, SchemeMetricsSnapshot,
};
use crate::traits::EvictionScheme;

/// Fixed-capacity FIFO storage.
///
/// # Example
///
/// ```
/// use cyclecache::policy::fifo::FifoScheme;
///
/// let mut fifo = FifoScheme::new(2);
/// fifo.insert("a", 1);
/// fifo.insert("b", 2);
/// fifo.get(&"a");
/// fifo.insert("c", 3);
///
/// // Reading "a" did not save it.
/// assert!(!fifo.contains(&"a"));
/// ```
#[derive(Debug)]
pub struct FifoScheme<K, V> {
    order: IntrusiveList<(K, V)>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: SchemeMetrics,
}

impl<K, V> FifoScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            order: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: SchemeMetrics::default(),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("FIFO capacity must be greater than zero"));
        }
        Ok(Self::new(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_find();

        self.index.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.1, value));
        }

        if self.capacity == 0 {
            return None;
        }

        if self.index.len() >= self.capacity && self.pop_oldest().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front((key.clone(), value));
        self.index.insert(key, id);
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self
            .index
            .remove(key)
            .and_then(|id| self.order.remove(id))
            .map(|(_, value)| value);

        #[cfg(feature = "metrics")]
        self.metrics.record_erase(removed.is_some());

        removed
    }

    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_back()?;
        self.index.remove(&key);
        Some((key, value))
    }

    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.order.back().map(|(key, value)| (key, value))
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.order.clear();
        self.index.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SchemeMetricsSnapshot> for FifoScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> SchemeMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

impl<K, V> EvictionScheme<K, V> for FifoScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn find(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek();

        FifoScheme::get(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        {
            if self.index.contains_key(key) {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }

        FifoScheme::get(self, key)
    }

    fn next_erasure_pair(&self) -> Option<(&K, &V)> {
        if self.len() == self.capacity {
            self.peek_oldest()
        } else {
            None
        }
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        FifoScheme::insert(self, key, value)
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn clear(&mut self) {
        FifoScheme::clear(self);
    }
}
