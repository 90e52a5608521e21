//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the cache invariants: capacity enforcement, LRU
//! ordering, recency protection, TTL expiry, statistics accuracy, and
//! injectivity of the structured cache key serialization.

use proptest::prelude::*;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{GenerationKey, SignalKey, TtlCache};
use crate::models::Intensity;

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// GitHub-shaped usernames (also valid cache key components)
fn username_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9-]{1,39}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

fn intensity_strategy() -> impl Strategy<Value = Intensity> {
    prop_oneof![
        Just(Intensity::Mild),
        Just(Intensity::Medium),
        Just(Intensity::Spicy),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (username_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        username_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, hit and miss counters reflect exactly
    // the observed get outcomes, and total_entries tracks the live count.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = TtlCache::new(TEST_CAPACITY, TEST_TTL).unwrap();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries mismatch");
    }

    // Storing then retrieving (before expiry) returns the stored value.
    #[test]
    fn prop_roundtrip_storage(key in username_strategy(), value in value_strategy()) {
        let mut cache = TtlCache::new(TEST_CAPACITY, TEST_TTL).unwrap();

        cache.set(key.clone(), value.clone());
        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // Overwriting a key leaves one entry holding the newest value.
    #[test]
    fn prop_overwrite_semantics(
        key in username_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = TtlCache::new(TEST_CAPACITY, TEST_TTL).unwrap();

        cache.set(key.clone(), value1);
        cache.set(key.clone(), value2.clone());

        prop_assert_eq!(cache.get(&key), Some(value2));
        prop_assert_eq!(cache.len(), 1);
    }

    // The entry count never exceeds capacity regardless of insert volume.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec(
            (username_strategy(), value_strategy()),
            1..200
        )
    ) {
        let capacity = 50;
        let mut cache = TtlCache::new(capacity, TEST_TTL).unwrap();

        for (key, value) in entries {
            cache.set(key, value);
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // Filling a cache to capacity and inserting one more key evicts exactly
    // the least recently used entry.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(username_strategy(), 3..10),
        new_key in username_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut cache = TtlCache::new(capacity, TEST_TTL).unwrap();

        let oldest_key = unique_keys[0].clone();
        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key));
        }
        prop_assert_eq!(cache.len(), capacity);

        cache.set(new_key.clone(), new_value);

        prop_assert_eq!(cache.len(), capacity, "Still at capacity after eviction");
        prop_assert!(cache.get(&oldest_key).is_none(), "Oldest key evicted");
        prop_assert!(cache.get(&new_key).is_some(), "New key present");
        for key in unique_keys.iter().skip(1) {
            prop_assert!(cache.get(key).is_some(), "Key '{}' survives", key);
        }
    }

    // A get on the eviction candidate moves it to most recently used, so the
    // next eviction takes the following key instead.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(username_strategy(), 3..8),
        new_key in username_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 3);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut cache = TtlCache::new(capacity, TEST_TTL).unwrap();

        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key));
        }

        let accessed_key = unique_keys[0].clone();
        let _ = cache.get(&accessed_key);
        let expected_evicted = unique_keys[1].clone();

        cache.set(new_key.clone(), new_value);

        prop_assert!(cache.get(&accessed_key).is_some(), "Touched key survives");
        prop_assert!(cache.get(&expected_evicted).is_none(), "Next-oldest evicted");
        prop_assert!(cache.get(&new_key).is_some());
    }

    // Distinct signal keys never canonicalize to the same string. The ':'
    // delimiter cannot appear in a username, so components stay separable.
    #[test]
    fn prop_signal_key_canonical_injective(
        user_a in username_strategy(),
        repos_a in 1u8..=20,
        readme_a in any::<bool>(),
        user_b in username_strategy(),
        repos_b in 1u8..=20,
        readme_b in any::<bool>()
    ) {
        let a = SignalKey::new(&user_a, repos_a, readme_a);
        let b = SignalKey::new(&user_b, repos_b, readme_b);

        if a != b {
            prop_assert_ne!(a.canonical(), b.canonical());
        } else {
            prop_assert_eq!(a.canonical(), b.canonical());
        }
    }

    // Same for generation keys across all intensities.
    #[test]
    fn prop_generation_key_canonical_injective(
        user_a in username_strategy(),
        intensity_a in intensity_strategy(),
        user_b in username_strategy(),
        intensity_b in intensity_strategy()
    ) {
        let a = GenerationKey::new(&user_a, intensity_a);
        let b = GenerationKey::new(&user_b, intensity_b);

        if a != b {
            prop_assert_ne!(a.canonical(), b.canonical());
        } else {
            prop_assert_eq!(a.canonical(), b.canonical());
        }
    }

    // Signal and generation keys live in separate caches, but their
    // canonical forms also stay distinct for any username whose signal key
    // would be confused with an intensity suffix.
    #[test]
    fn prop_key_spaces_disjoint(
        user in username_strategy(),
        intensity in intensity_strategy(),
        repos in 1u8..=20,
        readme in any::<bool>()
    ) {
        let signal = SignalKey::new(&user, repos, readme).canonical();
        let generation = GenerationKey::new(&user, intensity).canonical();
        prop_assert_ne!(signal, generation);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // After the TTL elapses, a get returns absent even though no sweep ran.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in username_strategy(),
        value in value_strategy()
    ) {
        let mut cache = TtlCache::new(TEST_CAPACITY, Duration::from_millis(60)).unwrap();

        cache.set(key.clone(), value.clone());
        prop_assert_eq!(cache.get(&key), Some(value));

        sleep(Duration::from_millis(90));

        prop_assert!(cache.get(&key).is_none(), "Entry absent after TTL");
    }
}
