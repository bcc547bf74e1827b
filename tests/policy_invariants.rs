// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every eviction scheme must share so that `EvictingCache` can
// announce evictions correctly regardless of the policy behind it.

use cyclecache::builder::{CacheBuilder, CachePolicy, PolicyScheme};
use cyclecache::traits::EvictionScheme;

const POLICIES: [CachePolicy; 2] = [CachePolicy::Lru, CachePolicy::Fifo];

fn scheme(capacity: usize, policy: CachePolicy) -> PolicyScheme<u32, u32> {
    CacheBuilder::new(capacity).build_scheme(policy)
}

// ==============================================
// Capacity-0 Behavior
// ==============================================

#[test]
fn capacity_zero_is_honored() {
    for policy in POLICIES {
        let mut s = scheme(0, policy);
        assert_eq!(s.capacity(), 0, "{policy:?} should honor capacity=0");
        assert!(s.full());
        s.insert(1, 1);
        assert_eq!(s.size(), 0, "{policy:?} with capacity=0 should reject inserts");
        assert_eq!(s.next_erasure_pair(), None);
    }
}

// ==============================================
// Predicted victim is the actual victim
// ==============================================

#[test]
fn next_erasure_pair_names_the_evicted_key() {
    for policy in POLICIES {
        let mut s = scheme(3, policy);
        for key in 0..3 {
            assert_eq!(s.next_erasure_pair(), None, "{policy:?} is not full yet");
            s.insert(key, key * 10);
        }
        s.get(&0);

        for next in 3..20 {
            let victim = *s
                .next_erasure_pair()
                .expect("full scheme must name a victim")
                .0;
            s.insert(next, next * 10);
            assert!(!s.find(&victim), "{policy:?} evicted a different key");
            assert_eq!(s.size(), 3);
        }
    }
}

// ==============================================
// Size never exceeds capacity
// ==============================================

#[test]
fn size_is_bounded_by_capacity() {
    for policy in POLICIES {
        let mut s = scheme(5, policy);
        for key in 0..100u32 {
            s.insert(key % 17, key);
            if key % 3 == 0 {
                s.erase(&(key % 7));
            }
            assert!(s.size() <= s.capacity());
        }
    }
}
