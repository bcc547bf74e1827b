/// Point-in-time copy of an eviction scheme's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SchemeMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_new: u64,
    pub insert_updates: u64,
    pub evictions: u64,

    pub erase_calls: u64,
    pub erase_found: u64,
    pub clears: u64,

    pub find_calls: u64,
    pub peek_calls: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl SchemeMetricsSnapshot {
    /// Fraction of `get` calls that hit; `0.0` before any call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
