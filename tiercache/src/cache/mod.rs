//! Cache Module
//!
//! Single-level caches that make up a hierarchy:
//! - LRU: recency ordering over a doubly-linked slab
//! - LFU: frequency ordering, oldest access breaks ties
//!
//! Both expose the [`CacheLevel`] capability so the hierarchy can mix them.

use serde::Serialize;
use std::hash::Hash;

use crate::core::error::{CacheError, Result};
use crate::core::types::{EvictionPolicy, LevelSnapshot};

pub mod lfu;
pub mod lru;

pub use lfu::FrequencyCache;
pub use lru::RecencyCache;

/// Capability shared by every cache level in a hierarchy
pub trait CacheLevel<K, V>: Send {
    /// Look up a key, refreshing its policy metadata on hit
    fn get(&mut self, key: &K) -> Option<V>;

    /// Insert or update a key, evicting according to the level's policy
    fn put(&mut self, key: K, value: V);

    /// Ordered view for display and testing; does not touch metadata
    fn snapshot(&self) -> LevelSnapshot<K, V>;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn policy(&self) -> EvictionPolicy;

    fn stats(&self) -> &CacheStats;
}

/// Build a boxed level for `policy`.
///
/// LRU rejects a non-positive capacity. LFU accepts it and stays empty forever.
pub fn new_level<K, V>(policy: EvictionPolicy, capacity: i64) -> Result<Box<dyn CacheLevel<K, V>>>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    match policy {
        EvictionPolicy::Lru => {
            let capacity = usize::try_from(capacity)
                .map_err(|_| CacheError::InvalidCapacity(capacity))?;
            Ok(Box::new(RecencyCache::new(capacity)?))
        }
        EvictionPolicy::Lfu => {
            let capacity = usize::try_from(capacity).unwrap_or(0);
            Ok(Box::new(FrequencyCache::new(capacity)))
        }
    }
}

/// Per-level counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.update_hit_rate();
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.update_hit_rate();
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn update_hit_rate(&mut self) {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hit_rate = self.hits as f64 / total as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_level_lru_rejects_non_positive() {
        let zero = new_level::<String, String>(EvictionPolicy::Lru, 0);
        assert_eq!(zero.err(), Some(CacheError::InvalidCapacity(0)));

        let negative = new_level::<String, String>(EvictionPolicy::Lru, -3);
        assert_eq!(negative.err(), Some(CacheError::InvalidCapacity(-3)));
    }

    #[test]
    fn test_new_level_lfu_degenerate_capacity() {
        let mut level = new_level::<&str, i32>(EvictionPolicy::Lfu, -1).unwrap();
        assert_eq!(level.capacity(), 0);

        level.put("a", 1);
        assert!(level.is_empty());
        assert_eq!(level.get(&"a"), None);
    }

    #[test]
    fn test_new_level_huge_capacity() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
            let mut level = new_level::<&str, i32>(policy, i64::MAX).unwrap();
            assert_eq!(level.capacity(), i64::MAX as usize);

            level.put("a", 1);
            assert_eq!(level.get(&"a"), Some(1));
        }
    }

    #[test]
    fn test_new_level_reports_policy() {
        let lru = new_level::<&str, i32>(EvictionPolicy::Lru, 4).unwrap();
        let lfu = new_level::<&str, i32>(EvictionPolicy::Lfu, 4).unwrap();
        assert_eq!(lru.policy(), EvictionPolicy::Lru);
        assert_eq!(lfu.policy(), EvictionPolicy::Lfu);
        assert_eq!(lru.capacity(), 4);
    }

    #[test]
    fn test_cache_stats() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_insert();
        stats.record_eviction();

        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, 0.5);
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.evictions, 1);
    }
}
