//! LRU (Least Recently Used) Cache Implementation
//!
//! Entries live in a slab of nodes linked into a recency list
//! (head = least recent, tail = most recent) and are indexed by key,
//! so `get` and `put` are O(1). Once the slab reaches capacity an
//! eviction reuses the head slot for the incoming key.

use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

use super::{CacheLevel, CacheStats};
use crate::core::error::{CacheError, Result};
use crate::core::types::{EntrySnapshot, EvictionPolicy, LevelSnapshot};

struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU Cache - evicts the entry untouched for the longest time
pub struct RecencyCache<K: Hash + Eq + Clone, V: Clone> {
    capacity: usize,
    index: HashMap<K, usize>,
    nodes: Vec<Node<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
    stats: CacheStats,
}

impl<K: Hash + Eq + Clone, V: Clone> RecencyCache<K, V> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(0));
        }

        Ok(Self {
            capacity,
            index: HashMap::new(),
            nodes: Vec::new(),
            head: None,
            tail: None,
            stats: CacheStats::new(),
        })
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.index.get(key).copied() {
            Some(idx) => {
                self.touch(idx);
                self.stats.record_hit();
                Some(self.nodes[idx].value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.index.get(&key) {
            self.nodes[idx].value = value;
            self.touch(idx);
            self.stats.record_update();
            return;
        }

        if self.index.len() >= self.capacity {
            if let Some(idx) = self.head {
                self.detach(idx);
                let node = &mut self.nodes[idx];
                let evicted = std::mem::replace(&mut node.key, key.clone());
                node.value = value;
                self.index.remove(&evicted);
                self.index.insert(key, idx);
                self.push_back(idx);
                self.stats.record_eviction();
                self.stats.record_insert();
                debug!("LRU evicted least recent entry (slot {})", idx);
                return;
            }
        }

        let idx = self.nodes.len();
        self.nodes.push(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, idx);
        self.push_back(idx);
        self.stats.record_insert();
    }

    /// Least recently used entry, without refreshing it
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.head.map(|idx| (&self.nodes[idx].key, &self.nodes[idx].value))
    }

    /// Keys ordered least recent first
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|node| node.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn iter(&self) -> RecencyIter<'_, K, V> {
        RecencyIter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Move `idx` to the most-recent end
    fn touch(&mut self, idx: usize) {
        if self.tail != Some(idx) {
            self.detach(idx);
            self.push_back(idx);
        }
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    fn push_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = None;

        match self.tail {
            Some(t) => self.nodes[t].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}

struct RecencyIter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for RecencyIter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.cursor?];
        self.cursor = node.next;
        Some(node)
    }
}

impl<K, V> CacheLevel<K, V> for RecencyCache<K, V>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    fn get(&mut self, key: &K) -> Option<V> {
        RecencyCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        RecencyCache::put(self, key, value)
    }

    fn snapshot(&self) -> LevelSnapshot<K, V> {
        LevelSnapshot {
            policy: EvictionPolicy::Lru,
            capacity: self.capacity,
            entries: self
                .iter()
                .map(|node| EntrySnapshot::recency(node.key.clone(), node.value.clone()))
                .collect(),
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lru
    }

    fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
