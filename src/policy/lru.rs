//! Least-recently-used eviction scheme.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>         list: IntrusiveList<(K, V)>
//!   ┌─────────┬─────────┐
//!   │  key A  │  id_1   │──┐    head ─► [C,c] ◄──► [A,a] ◄──► [B,b] ◄── tail
//!   │  key B  │  id_2   │  │            MRU                     LRU
//!   │  key C  │  id_3   │  │                                    ▲
//!   └─────────┴─────────┘  └─ O(1) jump to a node               │
//!                                                   next_erasure_pair()
//! ```
//!
//! Both views share one set of entries: the index finds a node by key, the
//! list orders nodes by recency. `get` relinks the node at the head, `insert`
//! on a full scheme unlinks the tail first.
//!
//! ## Performance
//! - `find` / `peek` / `get` / `insert` / `erase`: O(1) average
//! - `recency_rank`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsSnapshotProvider, SchemeMetrics, SchemeMetricsRecorder, SchemeMetricsSnapshot,
};
use crate::traits::EvictionScheme;

/// Fixed-capacity LRU storage.
///
/// # Example
///
/// ```
/// use cyclecache::policy::lru::LruScheme;
///
/// let mut lru = LruScheme::new(3);
/// lru.insert(1, "one");
/// lru.insert(2, "two");
/// lru.insert(3, "three");
///
/// // Touch 1 so that 2 becomes the eviction candidate.
/// assert_eq!(lru.get(&1), Some(&"one"));
/// assert_eq!(lru.peek_lru(), Some((&2, &"two")));
///
/// lru.insert(4, "four");
/// assert!(!lru.contains(&2));
/// ```
#[derive(Debug)]
pub struct LruScheme<K, V> {
    list: IntrusiveList<(K, V)>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: SchemeMetrics,
}

impl<K, V> LruScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty scheme holding at most `capacity` entries.
    ///
    /// A capacity of zero is honored: such a scheme is always full and stores
    /// nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: SchemeMetrics::default(),
        }
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("LRU capacity must be greater than zero"));
        }
        Ok(Self::new(capacity))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.index.len() == self.capacity
    }

    /// Returns `true` if `key` is resident. Does not update recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_find();

        self.index.contains_key(key)
    }

    /// Reads a value without updating recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek();

        let id = *self.index.get(key)?;
        self.list.get(id).map(|(_, value)| value)
    }

    /// Reads a value and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|(_, value)| value)
    }

    /// Marks `key` most recently used without reading it.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }

    /// Inserts or updates `key`, evicting the LRU entry if a new key arrives
    /// at a full scheme. Returns the replaced value on update.
    ///
    /// # Example
    ///
    /// ```
    /// use cyclecache::policy::lru::LruScheme;
    ///
    /// let mut lru = LruScheme::new(2);
    /// assert_eq!(lru.insert("a", 1), None);
    /// assert_eq!(lru.insert("a", 2), Some(1));
    /// assert_eq!(lru.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.1, value));
        }

        if self.capacity == 0 {
            return None;
        }

        if self.index.len() >= self.capacity && self.pop_lru().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.list.push_front((key.clone(), value));
        self.index.insert(key, id);
        None
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self
            .index
            .remove(key)
            .and_then(|id| self.list.remove(id))
            .map(|(_, value)| value);

        #[cfg(feature = "metrics")]
        self.metrics.record_erase(removed.is_some());

        removed
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);
        Some((key, value))
    }

    /// The least recently used entry, left in place.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(key, value)| (key, value))
    }

    /// Position of `key` counted from the MRU end (`0` = most recent).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|(k, _)| k == key)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(key, value)| (key, value))
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.list.clear();
        self.index.clear();
    }

    /// Checks that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "recency list holds {} entries but index holds {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some((stored, _)) if stored == key => {},
                _ => return Err(InvariantError::new("index points at a foreign list node")),
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("LRU invariant violated: {err}");
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> SchemeMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SchemeMetricsSnapshot> for LruScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> SchemeMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> EvictionScheme<K, V> for LruScheme<K, V>
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
        LruScheme::peek(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruScheme::get(self, key)
    }

    fn next_erasure_pair(&self) -> Option<(&K, &V)> {
        if self.is_full() { self.peek_lru() } else { None }
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruScheme::insert(self, key, value)
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn clear(&mut self) {
        LruScheme::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(lru: &LruScheme<u32, V>) -> Vec<u32> {
        lru.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn fourth_insert_evicts_least_recent() {
        let mut lru = LruScheme::new(3);
        lru.insert(1, "a");
        lru.insert(2, "b");
        lru.insert(3, "c");
        lru.insert(4, "d");

        assert!(!lru.contains(&1));
        assert_eq!(keys(&lru), vec![4, 3, 2]);
        lru.debug_validate_invariants();
    }

    #[test]
    fn get_protects_from_eviction() {
        let mut lru = LruScheme::new(3);
        lru.insert(1, "a");
        lru.insert(2, "b");
        lru.insert(3, "c");
        assert_eq!(lru.get(&1), Some(&"a"));
        lru.insert(4, "d");

        assert!(lru.contains(&1));
        assert!(!lru.contains(&2));
        assert_eq!(keys(&lru), vec![4, 1, 3]);
    }

    #[test]
    fn get_miss_leaves_order_untouched() {
        let mut lru = LruScheme::new(2);
        lru.insert(1, 10);
        lru.insert(2, 20);
        assert_eq!(lru.get(&9), None);
        assert_eq!(keys(&lru), vec![2, 1]);
    }

    #[test]
    fn find_and_peek_do_not_touch() {
        let mut lru = LruScheme::new(2);
        lru.insert(1, 10);
        lru.insert(2, 20);
        assert!(lru.contains(&1));
        assert_eq!(lru.peek(&1), Some(&10));

        lru.insert(3, 30);
        assert!(!lru.contains(&1));
    }

    #[test]
    fn next_erasure_pair_only_when_full() {
        let mut lru = LruScheme::new(2);
        lru.insert(1, 10);
        assert_eq!(EvictionScheme::next_erasure_pair(&lru), None);

        lru.insert(2, 20);
        assert_eq!(EvictionScheme::next_erasure_pair(&lru), Some((&1, &10)));

        let predicted = *EvictionScheme::next_erasure_pair(&lru).unwrap().0;
        lru.insert(3, 30);
        assert!(!lru.contains(&predicted));
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn update_replaces_value_without_eviction() {
        let mut lru = LruScheme::new(2);
        lru.insert(1, 10);
        lru.insert(2, 20);
        assert_eq!(lru.insert(1, 11), Some(10));

        assert_eq!(lru.len(), 2);
        assert_eq!(keys(&lru), vec![1, 2]);
        assert_eq!(lru.peek(&1), Some(&11));
    }

    #[test]
    fn erase_reports_removal() {
        let mut lru = LruScheme::new(3);
        lru.insert(1, 10);
        lru.insert(2, 20);

        assert_eq!(EvictionScheme::erase(&mut lru, &1), Some(10));
        assert_eq!(EvictionScheme::erase(&mut lru, &1), None);
        assert_eq!(lru.len(), 1);
        lru.debug_validate_invariants();
    }

    #[test]
    fn clear_empties_both_views() {
        let mut lru = LruScheme::new(3);
        lru.insert(1, 10);
        lru.insert(2, 20);
        lru.clear();

        assert!(lru.is_empty());
        assert_eq!(lru.peek_lru(), None);
        assert!(lru.check_invariants().is_ok());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut lru: LruScheme<u32, u32> = LruScheme::new(0);
        assert!(lru.is_full());
        assert_eq!(lru.insert(1, 1), None);
        assert!(lru.is_empty());
        assert_eq!(EvictionScheme::next_erasure_pair(&lru), None);
        assert!(LruScheme::<u32, u32>::try_new(0).is_err());
    }

    #[test]
    fn touch_and_recency_rank() {
        let mut lru = LruScheme::new(3);
        lru.insert(1, ());
        lru.insert(2, ());
        lru.insert(3, ());
        assert_eq!(lru.recency_rank(&1), Some(2));

        assert!(lru.touch(&1));
        assert!(!lru.touch(&9));
        assert_eq!(lru.recency_rank(&1), Some(0));
        assert_eq!(lru.recency_rank(&9), None);
        assert_eq!(lru.pop_lru(), Some((2, ())));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_and_evictions() {
        let mut lru = LruScheme::new(1);
        lru.insert(1, 1);
        lru.get(&1);
        lru.get(&2);
        lru.insert(2, 2);
        lru.remove(&2);

        let snap = lru.metrics_snapshot();
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.insert_new, 2);
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.erase_found, 1);
        assert_eq!(snap.len, 0);
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, u16),
        Get(u8),
        Erase(u8),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..32, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
            (0u8..32).prop_map(Op::Get),
            (0u8..32).prop_map(Op::Erase),
        ]
    }

    proptest! {
        /// The scheme agrees with a Vec model ordered MRU-first.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 1usize..12,
            ops in prop::collection::vec(arb_op(), 0..200)
        ) {
            let mut lru = LruScheme::new(capacity);
            let mut model: Vec<(u8, u16)> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        if let Some(pos) = model.iter().position(|(mk, _)| *mk == k) {
                            model.remove(pos);
                        } else if model.len() == capacity {
                            model.pop();
                        }
                        model.insert(0, (k, v));
                        lru.insert(k, v);
                    },
                    Op::Get(k) => {
                        let expected = model.iter().position(|(mk, _)| *mk == k).map(|pos| {
                            let entry = model.remove(pos);
                            model.insert(0, entry);
                            entry.1
                        });
                        prop_assert_eq!(lru.get(&k).copied(), expected);
                    },
                    Op::Erase(k) => {
                        let expected = model
                            .iter()
                            .position(|(mk, _)| *mk == k)
                            .map(|pos| model.remove(pos).1);
                        prop_assert_eq!(lru.remove(&k), expected);
                    },
                }

                prop_assert!(lru.len() <= capacity);
                let order: Vec<(u8, u16)> = lru.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&order, &model);
            }
            lru.debug_validate_invariants();
        }
    }
}
