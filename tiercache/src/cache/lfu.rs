//! LFU (Least Frequently Used) Cache Implementation

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::debug;

use super::{CacheLevel, CacheStats};
use crate::core::types::{EntrySnapshot, EvictionPolicy, LevelSnapshot};

/// Entry in LFU cache with frequency counter and access tick
struct LfuEntry<V> {
    value: V,
    frequency: u64,
    last_access: u64,
}

/// LFU Cache - evicts least frequently used items.
///
/// Ties on frequency go to the entry with the oldest access tick, then to
/// the earliest inserted one. A capacity of zero yields a level that
/// ignores every write.
pub struct FrequencyCache<K: Hash + Eq + Clone, V: Clone> {
    capacity: usize,
    cache: HashMap<K, LfuEntry<V>>,
    /// Insertion sequence -> key, oldest first
    order: BTreeMap<u64, K>,
    clock: u64,
    next_seq: u64,
    stats: CacheStats,
}

impl<K: Hash + Eq + Clone, V: Clone> FrequencyCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            cache: HashMap::new(),
            order: BTreeMap::new(),
            clock: 0,
            next_seq: 0,
            stats: CacheStats::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.tick();
        match self.cache.get_mut(key) {
            Some(entry) => {
                entry.frequency += 1;
                entry.last_access = now;
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        let now = self.tick();

        // A write to an existing key counts as an access
        if let Some(entry) = self.cache.get_mut(&key) {
            entry.value = value;
            entry.frequency += 1;
            entry.last_access = now;
            self.stats.record_update();
            return;
        }

        if self.cache.len() >= self.capacity {
            self.evict_lfu();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.clone());
        self.cache.insert(
            key,
            LfuEntry {
                value,
                frequency: 1,
                last_access: now,
            },
        );
        self.stats.record_insert();
    }

    /// Access count of a resident key
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.cache.get(key).map(|e| e.frequency)
    }

    /// Tick of the last access to a resident key
    pub fn last_access(&self, key: &K) -> Option<u64> {
        self.cache.get(key).map(|e| e.last_access)
    }

    /// Key that the next eviction would remove
    pub fn peek_lfu(&self) -> Option<&K> {
        self.eviction_candidate().and_then(|seq| self.order.get(&seq))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Linear scan in insertion order; strict comparison keeps the first
    /// entry among exact ties.
    fn eviction_candidate(&self) -> Option<u64> {
        let mut best: Option<(u64, u64, u64)> = None;

        for (seq, key) in &self.order {
            let Some(entry) = self.cache.get(key) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((freq, access, _)) => (entry.frequency, entry.last_access) < (freq, access),
            };
            if better {
                best = Some((entry.frequency, entry.last_access, *seq));
            }
        }

        best.map(|(_, _, seq)| seq)
    }

    fn evict_lfu(&mut self) {
        let Some(seq) = self.eviction_candidate() else {
            return;
        };

        if let Some(key) = self.order.remove(&seq) {
            if let Some(entry) = self.cache.remove(&key) {
                self.stats.record_eviction();
                debug!(
                    "LFU evicted entry (freq={}, tick={})",
                    entry.frequency, entry.last_access
                );
            }
        }
    }
}

impl<K, V> CacheLevel<K, V> for FrequencyCache<K, V>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    fn get(&mut self, key: &K) -> Option<V> {
        FrequencyCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        FrequencyCache::put(self, key, value)
    }

    fn snapshot(&self) -> LevelSnapshot<K, V> {
        let entries = self
            .order
            .values()
            .filter_map(|key| {
                self.cache.get(key).map(|e| {
                    EntrySnapshot::frequency(
                        key.clone(),
                        e.value.clone(),
                        e.frequency,
                        e.last_access,
                    )
                })
            })
            .collect();

        LevelSnapshot {
            policy: EvictionPolicy::Lfu,
            capacity: self.capacity,
            entries,
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lfu
    }

    fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
