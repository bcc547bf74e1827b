//! Per-scheme operation counters (enabled with the `metrics` feature).
//!
//! Recording is split from reading: schemes write through
//! [`SchemeMetricsRecorder`], while benches and tests read a
//! [`SchemeMetricsSnapshot`] through [`MetricsSnapshotProvider`].
//!
//! ```text
//!   LruScheme / FifoScheme ──record_*──► SchemeMetrics
//!                                             │ snapshot(len, capacity)
//!                                             ▼
//!                                   SchemeMetricsSnapshot
//! ```
//!
//! Read-only calls (`find`, `peek`, `next_erasure_pair`) take `&self`, so
//! their counters live in [`Cell`]s. Schemes are single-threaded, which is
//! what makes that sound.

pub mod snapshot;

use std::cell::Cell;

pub use snapshot::SchemeMetricsSnapshot;

/// Counters every eviction scheme records.
pub trait SchemeMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_eviction(&mut self);
    fn record_erase(&mut self, found: bool);
    fn record_clear(&mut self);
    fn record_find(&self);
    fn record_peek(&self);
}

/// Produces a point-in-time copy of a component's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

#[derive(Debug, Default)]
pub struct SchemeMetrics {
    get_hits: u64,
    get_misses: u64,
    insert_new: u64,
    insert_updates: u64,
    evictions: u64,
    erase_calls: u64,
    erase_found: u64,
    clears: u64,
    find_calls: Cell<u64>,
    peek_calls: Cell<u64>,
}

impl SchemeMetrics {
    /// Copies the counters, adding the gauges the caller observed.
    pub fn snapshot(&self, len: usize, capacity: usize) -> SchemeMetricsSnapshot {
        SchemeMetricsSnapshot {
            get_calls: self.get_hits + self.get_misses,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            evictions: self.evictions,
            erase_calls: self.erase_calls,
            erase_found: self.erase_found,
            clears: self.clears,
            find_calls: self.find_calls.get(),
            peek_calls: self.peek_calls.get(),
            len,
            capacity,
        }
    }
}

impl SchemeMetricsRecorder for SchemeMetrics {
    fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_erase(&mut self, found: bool) {
        self.erase_calls += 1;
        if found {
            self.erase_found += 1;
        }
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }

    fn record_find(&self) {
        self.find_calls.set(self.find_calls.get() + 1);
    }

    fn record_peek(&self) {
        self.peek_calls.set(self.peek_calls.get() + 1);
    }
}
