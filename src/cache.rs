//! Eviction-aware cache: a scheme plus insert/evict notifications.
//!
//! ## Notification protocol
//!
//! ```text
//!   insert(k, v)
//!     │
//!     ├─ k resident?  ── yes ─► scheme.insert (update) ─► on_insert(k, v)
//!     │
//!     └─ no ─► scheme full? ── yes ─► on_evict(next_erasure_pair)
//!                  │                        │
//!                  └────────────┬───────────┘
//!                               ▼
//!                        scheme.insert(k, v)      (scheme drops the victim)
//!                               ▼
//!                         on_insert(k, v)
//!
//!   erase(k)  ─► scheme.erase ─► removed? ─► on_evict(k, removed_value)
//!   clear()   ─► scheme.clear             (silent, no per-entry callbacks)
//! ```
//!
//! The evict notification always fires while the victim is still resident,
//! so the callback sees the exact entry that is about to disappear.
//! Manual erasure reports through the same `on_evict(&K, &V)` callback.

use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use crate::policy::lru::LruScheme;
use crate::traits::EvictionScheme;

/// Cache wrapper that reports inserts and evictions to callbacks.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
///
/// use cyclecache::cache::EvictingCache;
///
/// let evicted = RefCell::new(Vec::new());
/// let mut cache = EvictingCache::lru(2, |_: &u32, _: &&str| {}, |k: &u32, _: &&str| {
///     evicted.borrow_mut().push(*k)
/// });
///
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.get(&1);
/// cache.insert(3, "three");
///
/// assert_eq!(*evicted.borrow(), vec![2]);
/// ```
pub struct EvictingCache<K, V, S, I, E>
where
    S: EvictionScheme<K, V>,
    I: FnMut(&K, &V),
    E: FnMut(&K, &V),
{
    scheme: S,
    on_insert: I,
    on_evict: E,
    _entries: PhantomData<fn(K, V)>,
}

impl<K, V, I, E> EvictingCache<K, V, LruScheme<K, V>, I, E>
where
    K: Eq + Hash + Clone,
    I: FnMut(&K, &V),
    E: FnMut(&K, &V),
{
    /// Shorthand for a cache over a fresh [`LruScheme`].
    pub fn lru(capacity: usize, on_insert: I, on_evict: E) -> Self {
        Self::new(LruScheme::new(capacity), on_insert, on_evict)
    }
}

impl<K, V, S, I, E> EvictingCache<K, V, S, I, E>
where
    K: Clone,
    S: EvictionScheme<K, V>,
    I: FnMut(&K, &V),
    E: FnMut(&K, &V),
{
    pub fn new(scheme: S, on_insert: I, on_evict: E) -> Self {
        Self {
            scheme,
            on_insert,
            on_evict,
            _entries: PhantomData,
        }
    }

    /// Stores `value` under `key`, announcing any eviction first.
    ///
    /// Returns `true` if the entry is resident afterwards. Only a
    /// zero-capacity scheme refuses entries, and then no callback fires.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.scheme.capacity() == 0 {
            return false;
        }

        if !self.scheme.find(&key)
            && self.scheme.full()
            && let Some((victim_key, victim_value)) = self.scheme.next_erasure_pair()
        {
            debug!(size = self.scheme.size(), "evicting entry to make room");
            (self.on_evict)(victim_key, victim_value);
        }

        let notify_key = key.clone();
        self.scheme.insert(key, value);

        match self.scheme.peek(&notify_key) {
            Some(stored) => {
                (self.on_insert)(&notify_key, stored);
                true
            },
            None => false,
        }
    }

    /// Removes `key`; on removal `on_evict` receives the removed entry.
    pub fn erase(&mut self, key: &K) -> bool {
        match self.scheme.erase(key) {
            Some(value) => {
                (self.on_evict)(key, &value);
                true
            },
            None => false,
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.scheme.get(key)
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        self.scheme.peek(key)
    }

    pub fn find(&self, key: &K) -> bool {
        self.scheme.find(key)
    }

    pub fn empty(&self) -> bool {
        self.scheme.empty()
    }

    pub fn full(&self) -> bool {
        self.scheme.full()
    }

    pub fn size(&self) -> usize {
        self.scheme.size()
    }

    pub fn capacity(&self) -> usize {
        self.scheme.capacity()
    }

    /// Drops every entry without invoking any callback.
    pub fn clear(&mut self) {
        self.scheme.clear();
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn into_scheme(self) -> S {
        self.scheme
    }
}

impl<K, V, S, I, E> std::fmt::Debug for EvictingCache<K, V, S, I, E>
where
    S: EvictionScheme<K, V> + std::fmt::Debug,
    I: FnMut(&K, &V),
    E: FnMut(&K, &V),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvictingCache")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}
