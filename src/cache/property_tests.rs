//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple FIFO model.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{generate_key, TtlCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,2}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

/// Reference model: map plus write order, evicting from the front.
#[derive(Default)]
struct FifoModel {
    values: HashMap<String, u32>,
    order: VecDeque<String>,
}

impl FifoModel {
    fn set(&mut self, key: &str, value: u32, max_size: usize) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_string());
        self.values.insert(key.to_string(), value);
        while self.values.len() > max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.values.remove(&oldest);
            }
        }
    }

    fn delete(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.values.remove(key);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Size bound: after every write the cache holds at most max_size entries.
    #[test]
    fn prop_size_never_exceeds_bound(
        max_size in 1usize..8,
        entries in prop::collection::vec((key_strategy(), any::<u32>()), 1..100)
    ) {
        let mut cache = TtlCache::new(TEST_TTL, max_size);

        for (key, value) in entries {
            cache.set(key, value);
            prop_assert!(
                cache.len() <= max_size,
                "Cache size {} exceeds max {}",
                cache.len(),
                max_size
            );
        }
    }

    // Any operation sequence leaves the cache agreeing with the FIFO model.
    #[test]
    fn prop_matches_fifo_model(
        max_size in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut cache = TtlCache::new(TEST_TTL, max_size);
        let mut model = FifoModel::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.clone(), value);
                    model.set(&key, value, max_size);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.values.get(&key).copied());
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                    model.delete(&key);
                }
            }
        }

        let expected: Vec<String> = model.order.iter().cloned().collect();
        prop_assert_eq!(cache.stats().keys, expected);
    }

    // Reads never change which key is evicted next.
    #[test]
    fn prop_reads_do_not_reorder(
        reads in prop::collection::vec(0usize..3, 0..10)
    ) {
        let mut cache = TtlCache::new(TEST_TTL, 3);
        let keys = ["a", "b", "c"];
        for (i, key) in keys.iter().enumerate() {
            cache.set(*key, i as u32);
        }

        for idx in reads {
            cache.get(keys[idx]);
        }
        cache.set("d", 3);

        prop_assert_eq!(cache.get("a"), None);
        prop_assert_eq!(cache.len(), 3);
    }

    // Delete makes the key unreadable immediately.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in any::<u32>()) {
        let mut cache = TtlCache::new(TEST_TTL, 10);

        cache.set(key.clone(), value);
        prop_assert_eq!(cache.get(&key), Some(value));

        cache.delete(&key);
        prop_assert_eq!(cache.get(&key), None);
    }

    // Key derivation is stable for structurally equal inputs.
    #[test]
    fn prop_key_generation_is_deterministic(
        prefix in "[a-z]{1,8}",
        params in prop::collection::btree_map("[a-z]{1,4}", any::<i64>(), 0..6)
    ) {
        let first = generate_key(&prefix, Some(&params)).unwrap();
        let reversed: Vec<(String, i64)> = params.clone().into_iter().rev().collect();
        let as_json = serde_json::Value::Object(
            reversed
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::from(v)))
                .collect(),
        );
        let second = generate_key(&prefix, Some(&as_json)).unwrap();
        prop_assert_eq!(first, second);
    }
}

// Separate block with few cases for time-sensitive TTL checks
proptest! {
    #![proptest_config(ProptestConfig::with_cases(3))]

    // Entries are never served once older than the TTL.
    #[test]
    fn prop_ttl_expiration(key in key_strategy(), value in any::<u32>()) {
        let mut cache = TtlCache::new(Duration::from_millis(100), 10);

        cache.set(key.clone(), value);
        prop_assert_eq!(cache.get(&key), Some(value));

        sleep(Duration::from_millis(150));

        prop_assert_eq!(cache.get(&key), None);
        prop_assert!(cache.is_empty());
    }
}
