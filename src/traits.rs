//! # Eviction Scheme Trait
//!
//! An eviction scheme is the storage half of an
//! [`EvictingCache`](crate::cache::EvictingCache): it owns the entries, bounds
//! them by a fixed capacity and decides which entry leaves when a new one
//! arrives. The wrapper only talks to schemes through this trait, so policies
//! can be swapped without touching the notification protocol.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                 EvictingCache<K, V, S, I, E>                  │
//!   │   on_insert(&K, &V)                      on_evict(&K, &V)     │
//!   └───────────────────────────────┬───────────────────────────────┘
//!                                   │ EvictionScheme<K, V>
//!                                   ▼
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │  capacity  empty  full  size  find  peek  get                 │
//!   │  insert  erase  clear  next_erasure_pair                      │
//!   └───────────────┬───────────────────────────────┬───────────────┘
//!                   ▼                               ▼
//!          ┌─────────────────┐             ┌─────────────────┐
//!          │ LruScheme<K, V> │             │ FifoScheme<K,V> │
//!          │ get → MRU       │             │ get: no reorder │
//!          └─────────────────┘             └─────────────────┘
//! ```
//!
//! ## Contract
//!
//! | Method              | Recency effect | Notes                                   |
//! |---------------------|----------------|-----------------------------------------|
//! | `find` / `peek`     | none           | membership / read without touching      |
//! | `get`               | policy-defined | LRU moves the entry to MRU              |
//! | `next_erasure_pair` | none           | `Some` only when `full()`               |
//! | `insert`            | new → newest   | evicts `next_erasure_pair` when full    |
//! | `erase`             | n/a            | `Some(value)` iff an entry was removed  |
//! | `clear`             | n/a            | drops everything                        |
//!
//! A scheme must evict exactly the entry reported by `next_erasure_pair` when
//! `insert` is called on a full scheme with a key that is not resident. The
//! wrapper relies on this to announce evictions before they happen.

/// Fixed-capacity key/value storage with a pluggable eviction order.
///
/// # Example
///
/// ```
/// use cyclecache::policy::lru::LruScheme;
/// use cyclecache::traits::EvictionScheme;
///
/// fn fill<S: EvictionScheme<u32, &'static str>>(scheme: &mut S) {
///     scheme.insert(1, "one");
///     scheme.insert(2, "two");
/// }
///
/// let mut scheme = LruScheme::new(2);
/// fill(&mut scheme);
/// assert!(scheme.full());
/// assert_eq!(scheme.next_erasure_pair(), Some((&1, &"one")));
/// ```
pub trait EvictionScheme<K, V> {
    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Current number of resident entries.
    fn size(&self) -> usize;

    fn empty(&self) -> bool {
        self.size() == 0
    }

    /// `true` iff `size() == capacity()`.
    fn full(&self) -> bool {
        self.size() == self.capacity()
    }

    /// Membership test that leaves eviction order untouched.
    fn find(&self, key: &K) -> bool;

    /// Reads a value without affecting eviction order.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Reads a value as an access; the scheme may reorder the entry.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// The entry the next insert of a new key would evict.
    ///
    /// Returns `None` unless the scheme is full.
    fn next_erasure_pair(&self) -> Option<(&K, &V)>;

    /// Stores `value` under `key`.
    ///
    /// A resident key has its value replaced and the old value returned;
    /// nothing is evicted. Otherwise, when full, the entry named by
    /// [`next_erasure_pair`](Self::next_erasure_pair) is dropped first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value if it was resident.
    fn erase(&mut self, key: &K) -> Option<V>;

    fn clear(&mut self);
}
