//! Behavioural properties of the bounded LRU cache
//!
//! These tests pin down the observable contract: the size bound, which entry
//! gets evicted, that reads postpone eviction, and that `add` never
//! overwrites.

use boundlru::{BoundedLruCache, CacheError, Capacity, LruCacheBuilder};

/// The number of cached keys tracks min(distinct keys added, capacity)
#[test]
fn test_size_never_exceeds_capacity() {
    for capacity in [1usize, 2, 5, 17] {
        let cache = BoundedLruCache::new(capacity).unwrap();
        for i in 0..(capacity * 3) {
            cache.add(i, i);
            assert_eq!(cache.len(), (i + 1).min(capacity));
        }
    }
}

/// Without reads, the first inserted key is the first evicted
#[test]
fn test_evicts_oldest_when_no_reads() {
    let n = 4;
    let cache = BoundedLruCache::new(n).unwrap();
    for k in 1..=n + 1 {
        cache.add(k, k * 10);
    }

    assert!(!cache.contains(&1));
    for k in 2..=n + 1 {
        assert!(cache.contains(&k), "key {} should still be cached", k);
    }
}

/// Reading A before inserting C makes B the victim
#[test]
fn test_get_postpones_eviction() {
    let cache = BoundedLruCache::new(2).unwrap();
    cache.add("A", 1);
    cache.add("B", 2);
    assert_eq!(cache.get(&"A"), Some(1));
    cache.add("C", 3);

    assert!(cache.contains(&"A"));
    assert!(!cache.contains(&"B"));
    assert!(cache.contains(&"C"));
}

/// A second add for the same key keeps the first value and position
#[test]
fn test_add_is_insert_if_absent() {
    let cache = BoundedLruCache::new(2).unwrap();
    assert!(cache.add("A", "V1"));
    cache.add("B", "b");
    assert!(!cache.add("A", "V2"));

    assert_eq!(cache.peek(&"A"), Some("V1"));

    // A was not promoted by the duplicate add, so it is still evicted first
    cache.add("C", "c");
    assert!(!cache.contains(&"A"));
    assert!(cache.contains(&"B"));
}

#[test]
fn test_repeated_gets_return_same_value() {
    let cache = BoundedLruCache::new(3).unwrap();
    cache.add(9, String::from("nine"));
    for _ in 0..10 {
        assert_eq!(cache.get(&9).as_deref(), Some("nine"));
    }
    assert_eq!(cache.len(), 1);
}

/// A miss is `None` even when a stored value is the type's default
#[test]
fn test_miss_distinct_from_default_values() {
    let cache: BoundedLruCache<u32, Option<u32>> = BoundedLruCache::new(2).unwrap();
    cache.add(1, None);
    assert_eq!(cache.get(&1), Some(None));
    assert_eq!(cache.get(&2), None);

    let zeros: BoundedLruCache<u32, u32> = BoundedLruCache::new(1).unwrap();
    zeros.add(1, 0);
    assert_eq!(zeros.get(&1), Some(0));
    zeros.add(2, 0);
    assert_eq!(zeros.get(&1), None);
}

#[test]
fn test_three_entry_scenario() {
    let cache = BoundedLruCache::new(3).unwrap();
    cache.add(1, "a");
    cache.add(2, "b");
    cache.add(3, "c");
    let _ = cache.get(&1);
    cache.add(4, "d");

    assert!(!cache.contains(&2));
    assert!(cache.contains(&1));
    assert!(cache.contains(&3));
    assert!(cache.contains(&4));
    assert_eq!(cache.get(&1), Some("a"));
}

#[test]
fn test_contains_does_not_promote() {
    let cache = BoundedLruCache::new(2).unwrap();
    cache.add(1, ());
    cache.add(2, ());
    assert!(cache.contains(&1));
    cache.add(3, ());
    assert!(!cache.contains(&1));
}

#[test]
fn test_invalid_capacity_is_rejected() {
    assert!(matches!(
        BoundedLruCache::<u8, u8>::new(0),
        Err(CacheError::InvalidArgument(_))
    ));
    assert!(matches!(
        Capacity::try_from(-4i64),
        Err(CacheError::InvalidArgument(_))
    ));
    assert!(matches!(
        "-1".parse::<Capacity>(),
        Err(CacheError::InvalidArgument(_))
    ));
    assert!(LruCacheBuilder::new().capacity(0).build::<u8, u8>().is_err());
}

#[test]
fn test_capacity_from_config_string() {
    let capacity: Capacity = "3".parse().unwrap();
    let cache = LruCacheBuilder::new()
        .with_capacity(capacity)
        .name("config-driven")
        .build::<u8, u8>()
        .unwrap();

    for i in 0..10 {
        cache.add(i, i);
    }
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.name().as_deref(), Some("config-driven"));
}

#[test]
#[cfg(feature = "stats")]
fn test_stats_reflect_workload() {
    let cache = BoundedLruCache::new(2).unwrap();
    cache.add(1, 1);
    cache.add(2, 2);
    cache.add(3, 3); // evicts 1

    let _ = cache.get(&1); // miss
    let _ = cache.get(&2); // hit
    let _ = cache.get(&3); // hit

    let stats = cache.stats();
    assert_eq!(stats.hits(), 2);
    assert_eq!(stats.misses(), 1);
    assert_eq!(stats.evictions(), 1);
}
