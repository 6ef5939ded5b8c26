use std::fmt::{self, Display};
use std::hash::Hash;
use tracing::{debug, warn};

use super::error::{CacheError, Result};
use super::types::{EvictionPolicy, Hit, LevelSnapshot};
use crate::cache::{CacheLevel, CacheStats, new_level};

/// Ordered stack of cache levels; level 1 is consulted first.
///
/// Reads cascade down the levels and promote hits into every level above
/// the one that answered. Writes go through to all levels.
pub struct CacheHierarchy<K, V> {
    levels: Vec<Box<dyn CacheLevel<K, V>>>,
}

impl<K, V> CacheHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Append a level below the existing ones.
    ///
    /// `policy` is matched case-insensitively against LRU and LFU.
    /// Returns the 1-based index of the new level.
    pub fn add_level(&mut self, capacity: i64, policy: &str) -> Result<usize> {
        let policy = policy.parse::<EvictionPolicy>().inspect_err(|e| {
            warn!("Rejected cache level: {}", e);
        })?;
        self.add_level_with(policy, capacity)
    }

    /// Typed variant of [`add_level`](Self::add_level)
    pub fn add_level_with(&mut self, policy: EvictionPolicy, capacity: i64) -> Result<usize> {
        let level = new_level(policy, capacity).inspect_err(|e| {
            warn!("Rejected cache level: {}", e);
        })?;

        self.levels.push(level);
        let index = self.levels.len();
        debug!(
            "Cache level {} added with capacity={}, policy={}",
            index, capacity, policy
        );
        Ok(index)
    }

    /// Remove the level at 1-based `index`; its entries are discarded
    pub fn remove_level(&mut self, index: usize) -> Result<()> {
        if index == 0 || index > self.levels.len() {
            warn!("Invalid cache level: {}", index);
            return Err(CacheError::InvalidLevel {
                index,
                levels: self.levels.len(),
            });
        }

        let removed = self.levels.remove(index - 1);
        debug!(
            "Cache level {} removed ({} entries discarded)",
            index,
            removed.len()
        );
        Ok(())
    }

    /// Cascading lookup with promotion toward level 1
    pub fn get(&mut self, key: &K) -> Option<Hit<V>> {
        let (found_at, value) = self
            .levels
            .iter_mut()
            .enumerate()
            .find_map(|(i, level)| level.get(key).map(|v| (i, v)))?;

        debug!("Cache HIT at level {}", found_at + 1);
        self.promote(key, &value, found_at);

        Some(Hit {
            value,
            level: found_at + 1,
        })
    }

    /// Write-through insert into every level
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        if self.levels.is_empty() {
            warn!("PUT rejected: no cache levels available");
            return Err(CacheError::EmptyHierarchy);
        }

        for level in &mut self.levels {
            level.put(key.clone(), value.clone());
        }

        debug!("PUT written through {} levels", self.levels.len());
        Ok(())
    }

    /// Snapshot of every level paired with its 1-based index
    pub fn snapshot_all(&self) -> Vec<(usize, LevelSnapshot<K, V>)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, level)| (i + 1, level.snapshot()))
            .collect()
    }

    /// Per-level counters paired with the 1-based index
    pub fn stats(&self) -> Vec<(usize, CacheStats)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, level)| (i + 1, level.stats().clone()))
            .collect()
    }

    /// Policies of the levels, top to bottom
    pub fn policies(&self) -> Vec<EvictionPolicy> {
        self.levels.iter().map(|l| l.policy()).collect()
    }

    /// 1-based indices of the levels currently holding `key`, without touching metadata
    pub fn locate(&self, key: &K) -> Vec<usize> {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, level)| level.contains(key))
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Copy `value` into levels `found_at - 1` down to 0, nearest first.
    /// The level that answered is left alone.
    fn promote(&mut self, key: &K, value: &V, found_at: usize) {
        for i in (0..found_at).rev() {
            self.levels[i].put(key.clone(), value.clone());
            debug!("Promoted key to level {}", i + 1);
        }
    }
}

impl<K, V> CacheHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + Display + 'static,
    V: Clone + Send + 'static,
{
    /// Like [`get`](Self::get), but a miss is reported as `KeyNotFound`
    pub fn fetch(&mut self, key: &K) -> Result<Hit<V>> {
        self.get(key).ok_or_else(|| {
            debug!("Cache MISS for key: {}", key);
            CacheError::KeyNotFound(key.to_string())
        })
    }
}

impl<K, V> CacheHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + Display + 'static,
    V: Clone + Send + Display + 'static,
{
    /// One line per level, e.g. `Level 1: LRU Cache: {a=1, b=2}`
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl<K, V> Display for CacheHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + Display + 'static,
    V: Clone + Send + Display + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (index, snapshot)) in self.snapshot_all().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Level {}: {}", index, snapshot)?;
        }
        Ok(())
    }
}

impl<K, V> Default for CacheHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
