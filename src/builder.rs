//! Policy-selecting builder for eviction schemes and evicting caches.
//!
//! ## Example
//!
//! ```rust
//! use cyclecache::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(2).build::<u64, String, _, _>(
//!     CachePolicy::Lru,
//!     |_, _| {},
//!     |_, _| {},
//! );
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::cache::EvictingCache;
use crate::error::ConfigError;
use crate::policy::fifo::FifoScheme;
use crate::policy::lru::LruScheme;
use crate::traits::EvictionScheme;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Least recently used: `get` refreshes an entry.
    #[default]
    Lru,
    /// First in, first out: reads never change eviction order.
    Fifo,
}

/// A scheme chosen at runtime from a [`CachePolicy`].
#[derive(Debug)]
pub enum PolicyScheme<K, V> {
    Lru(LruScheme<K, V>),
    Fifo(FifoScheme<K, V>),
}

impl<K, V> PolicyScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn policy(&self) -> CachePolicy {
        match self {
            PolicyScheme::Lru(_) => CachePolicy::Lru,
            PolicyScheme::Fifo(_) => CachePolicy::Fifo,
        }
    }
}

impl<K, V> EvictionScheme<K, V> for PolicyScheme<K, V>
where
    K: Eq + Hash + Clone,
{
    fn capacity(&self) -> usize {
        match self {
            PolicyScheme::Lru(lru) => EvictionScheme::capacity(lru),
            PolicyScheme::Fifo(fifo) => EvictionScheme::capacity(fifo),
        }
    }

    fn size(&self) -> usize {
        match self {
            PolicyScheme::Lru(lru) => lru.size(),
            PolicyScheme::Fifo(fifo) => fifo.size(),
        }
    }

    fn find(&self, key: &K) -> bool {
        match self {
            PolicyScheme::Lru(lru) => lru.find(key),
            PolicyScheme::Fifo(fifo) => fifo.find(key),
        }
    }

    fn peek(&self, key: &K) -> Option<&V> {
        match self {
            PolicyScheme::Lru(lru) => EvictionScheme::peek(lru, key),
            PolicyScheme::Fifo(fifo) => EvictionScheme::peek(fifo, key),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self {
            PolicyScheme::Lru(lru) => EvictionScheme::get(lru, key),
            PolicyScheme::Fifo(fifo) => EvictionScheme::get(fifo, key),
        }
    }

    fn next_erasure_pair(&self) -> Option<(&K, &V)> {
        match self {
            PolicyScheme::Lru(lru) => lru.next_erasure_pair(),
            PolicyScheme::Fifo(fifo) => fifo.next_erasure_pair(),
        }
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self {
            PolicyScheme::Lru(lru) => EvictionScheme::insert(lru, key, value),
            PolicyScheme::Fifo(fifo) => EvictionScheme::insert(fifo, key, value),
        }
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        match self {
            PolicyScheme::Lru(lru) => lru.erase(key),
            PolicyScheme::Fifo(fifo) => fifo.erase(key),
        }
    }

    fn clear(&mut self) {
        match self {
            PolicyScheme::Lru(lru) => EvictionScheme::clear(lru),
            PolicyScheme::Fifo(fifo) => EvictionScheme::clear(fifo),
        }
    }
}

/// Builder carrying the capacity shared by every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds a bare scheme. A zero capacity yields a scheme that stores nothing.
    pub fn build_scheme<K, V>(&self, policy: CachePolicy) -> PolicyScheme<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match policy {
            CachePolicy::Lru => PolicyScheme::Lru(LruScheme::new(self.capacity)),
            CachePolicy::Fifo => PolicyScheme::Fifo(FifoScheme::new(self.capacity)),
        }
    }

    /// Like [`build_scheme`](Self::build_scheme) but rejects a zero capacity.
    pub fn try_build_scheme<K, V>(
        &self,
        policy: CachePolicy,
    ) -> Result<PolicyScheme<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.validate()?;
        Ok(self.build_scheme(policy))
    }

    /// Builds an [`EvictingCache`] over the chosen policy.
    pub fn build<K, V, I, E>(
        &self,
        policy: CachePolicy,
        on_insert: I,
        on_evict: E,
    ) -> EvictingCache<K, V, PolicyScheme<K, V>, I, E>
    where
        K: Eq + Hash + Clone,
        I: FnMut(&K, &V),
        E: FnMut(&K, &V),
    {
        EvictingCache::new(self.build_scheme(policy), on_insert, on_evict)
    }

    /// Like [`build`](Self::build) but rejects a zero capacity.
    pub fn try_build<K, V, I, E>(
        &self,
        policy: CachePolicy,
        on_insert: I,
        on_evict: E,
    ) -> Result<EvictingCache<K, V, PolicyScheme<K, V>, I, E>, ConfigError>
    where
        K: Eq + Hash + Clone,
        I: FnMut(&K, &V),
        E: FnMut(&K, &V),
    {
        self.validate()?;
        Ok(self.build(policy, on_insert, on_evict))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(())
    }
}
