//! Resource-handle cache: lazily created values with explicit teardown.
//!
//! Values are produced by a *create* handler and handed back to a *destroy*
//! handler when they leave the cache. The cache itself never tears a value
//! down; it only decides when each handler runs.
//!
//! ```text
//!   get(k) ── miss ──► put(k) ──► create(&k) ── Some(v) ──► map[k] = v
//!                                     │
//!                                     └──── None ──► nothing stored
//!
//!   erase(k) / clear() / drop ──► destroy(&k, v)  then the mapping goes
//! ```
//!
//! Entries are kept in a `BTreeMap`, so `clear` tears down in key order.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

/// Key → handle cache driven by create/destroy handlers.
///
/// `create` returns `None` when a handle cannot be produced. `destroy`
/// receives the handle by value and reports whether teardown succeeded.
/// Remaining handles are destroyed when the cache is dropped.
///
/// # Example
///
/// ```
/// use cyclecache::handle::ResourceCache;
///
/// let mut files = ResourceCache::new(
///     |name: &String| Some(format!("handle:{name}")),
///     |_: &String, _handle: String| true,
/// );
///
/// assert_eq!(files.get(&"a.txt".to_string()).map(String::as_str), Some("handle:a.txt"));
/// assert!(files.member(&"a.txt".to_string()));
/// assert!(!files.put("a.txt".to_string(), false));
/// ```
pub struct ResourceCache<K, T, C, D>
where
    K: Ord + Clone,
    C: FnMut(&K) -> Option<T>,
    D: FnMut(&K, T) -> bool,
{
    entries: BTreeMap<K, T>,
    create: C,
    destroy: D,
}

impl<K, T, C, D> ResourceCache<K, T, C, D>
where
    K: Ord + Clone,
    C: FnMut(&K) -> Option<T>,
    D: FnMut(&K, T) -> bool,
{
    pub fn new(create: C, destroy: D) -> Self {
        Self {
            entries: BTreeMap::new(),
            create,
            destroy,
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Presence test; never creates.
    pub fn member(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Creates a handle for `key`.
    ///
    /// A resident key is left alone (returns `false`) unless `force_update`
    /// is set, in which case the old handle is destroyed before the new one
    /// is created. Returns `false` without storing anything if `create`
    /// fails.
    pub fn put(&mut self, key: K, force_update: bool) -> bool {
        if self.entries.contains_key(&key) {
            if !force_update {
                return false;
            }
            self.erase(&key);
        }

        match (self.create)(&key) {
            Some(handle) => {
                self.entries.insert(key, handle);
                true
            },
            None => {
                debug!(resident = self.entries.len(), "resource creation failed");
                false
            },
        }
    }

    /// Returns the handle for `key`, creating it on a miss.
    pub fn get(&mut self, key: &K) -> Option<&T> {
        if !self.entries.contains_key(key) && !self.put(key.clone(), false) {
            return None;
        }
        self.entries.get(key)
    }

    /// Destroys and removes the handle for `key`.
    ///
    /// Returns the destroy handler's verdict, or `false` if `key` was absent.
    /// The mapping is removed either way.
    pub fn erase(&mut self, key: &K) -> bool {
        let Some((key, handle)) = self.entries.remove_entry(key) else {
            return false;
        };
        let destroyed = (self.destroy)(&key, handle);
        if !destroyed {
            debug!("resource destroy handler reported failure");
        }
        destroyed
    }

    /// Destroys every handle in key order, then empties the cache.
    pub fn clear(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        let mut failures = 0usize;
        for (key, handle) in entries {
            if !(self.destroy)(&key, handle) {
                failures += 1;
            }
        }
        if failures > 0 {
            debug!(failures, "resource destroy handler reported failures during clear");
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K, T, C, D> Drop for ResourceCache<K, T, C, D>
where
    K: Ord + Clone,
    C: FnMut(&K) -> Option<T>,
    D: FnMut(&K, T) -> bool,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, T, C, D> fmt::Debug for ResourceCache<K, T, C, D>
where
    K: Ord + Clone + fmt::Debug,
    C: FnMut(&K) -> Option<T>,
    D: FnMut(&K, T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCache")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create(u32),
        Destroy(u32, u64),
    }

    #[test]
    fn get_creates_once_then_reuses() {
        let next = Cell::new(100u64);
        let calls = RefCell::new(Vec::new());
        let mut cache = ResourceCache::new(
            |k: &u32| {
                calls.borrow_mut().push(Call::Create(*k));
                next.set(next.get() + 1);
                Some(next.get())
            },
            |_: &u32, _: u64| true,
        );

        assert_eq!(cache.get(&1).copied(), Some(101));
        assert_eq!(cache.get(&1).copied(), Some(101));
        assert_eq!(cache.size(), 1);
        drop(cache);
        assert_eq!(calls.into_inner(), vec![Call::Create(1)]);
    }

    #[test]
    fn put_without_force_keeps_original() {
        let mut cache = ResourceCache::new(|k: &u32| Some(u64::from(*k) * 10), |_: &u32, _: u64| true);
        assert!(cache.put(1, false));
        assert!(!cache.put(1, false));
        assert_eq!(cache.get(&1).copied(), Some(10));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn forced_put_destroys_before_creating() {
        let calls = RefCell::new(Vec::new());
        let generation = Cell::new(0u64);
        let mut cache = ResourceCache::new(
            |k: &u32| {
                calls.borrow_mut().push(Call::Create(*k));
                generation.set(generation.get() + 1);
                Some(generation.get())
            },
            |k: &u32, v: u64| {
                calls.borrow_mut().push(Call::Destroy(*k, v));
                true
            },
        );

        assert!(cache.put(7, false));
        assert!(cache.put(7, true));
        assert_eq!(cache.get(&7).copied(), Some(2));
        drop(cache);

        assert_eq!(
            calls.into_inner(),
            vec![
                Call::Create(7),
                Call::Destroy(7, 1),
                Call::Create(7),
                Call::Destroy(7, 2),
            ]
        );
    }

    #[test]
    fn failed_creation_stores_nothing() {
        let mut cache = ResourceCache::new(
            |k: &u32| (*k % 2 == 0).then_some(*k),
            |_: &u32, _: u32| true,
        );
        assert!(!cache.put(1, false));
        assert_eq!(cache.get(&3), None);
        assert!(!cache.member(&3));
        assert_eq!(cache.get(&4), Some(&4));
        assert!(cache.member(&4));
    }

    #[test]
    fn member_never_creates() {
        let created = Cell::new(0);
        let cache = ResourceCache::new(
            |k: &u32| {
                created.set(created.get() + 1);
                Some(*k)
            },
            |_: &u32, _: u32| true,
        );
        assert!(!cache.member(&1));
        assert!(cache.empty());
        drop(cache);
        assert_eq!(created.get(), 0);
    }

    #[test]
    fn erase_returns_destroy_verdict() {
        let mut cache = ResourceCache::new(|k: &u32| Some(*k), |k: &u32, _: u32| *k != 2);
        cache.put(1, false);
        cache.put(2, false);

        assert!(cache.erase(&1));
        assert!(!cache.erase(&2));
        assert!(!cache.member(&2));
        assert!(!cache.erase(&9));
    }

    #[test]
    fn clear_destroys_each_entry_once_in_key_order() {
        let destroyed = RefCell::new(Vec::new());
        let mut cache = ResourceCache::new(
            |k: &u32| Some(*k),
            |k: &u32, _: u32| {
                destroyed.borrow_mut().push(*k);
                true
            },
        );
        for key in [3, 1, 2] {
            cache.put(key, false);
        }

        cache.clear();
        assert!(cache.empty());
        drop(cache);
        assert_eq!(destroyed.into_inner(), vec![1, 2, 3]);
    }
}
