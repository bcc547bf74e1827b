// ==============================================
// LRU PERFORMANCE TESTS (integration)
// ==============================================
//
// Coarse guards that the dual-indexed layout keeps operations O(1): per-op
// latency must not grow with the number of resident entries.

use std::time::{Duration, Instant};

use cyclecache::policy::lru::LruScheme;

fn measure_time<F, R>(operation: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = operation();
    (result, start.elapsed())
}

fn churn_latency(capacity: u64) -> Duration {
    let mut lru = LruScheme::new(capacity as usize);
    for i in 0..capacity {
        lru.insert(i, i);
    }

    let iterations = 20_000u32;
    let (_, duration) = measure_time(|| {
        for i in 0..u64::from(iterations) {
            lru.get(&(i % capacity));
            lru.insert(capacity + i, i);
        }
    });
    duration / iterations
}

#[test]
fn get_and_insert_latency_is_bounded() {
    let avg = churn_latency(1_000);
    println!("Average get+insert latency: {avg:?}");
    assert!(
        avg < Duration::from_micros(50),
        "get+insert too slow: {avg:?}"
    );
}

#[test]
fn latency_does_not_scale_with_capacity() {
    let small = churn_latency(1_000);
    let large = churn_latency(100_000);
    println!("small: {small:?}, large: {large:?}");

    // Generous: a linear scan would be ~100x slower.
    assert!(
        large < small * 20 + Duration::from_micros(5),
        "latency grew with capacity: {small:?} -> {large:?}"
    );
}
