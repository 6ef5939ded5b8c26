use parking_lot::Mutex;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use super::error::Result;
use super::hierarchy::CacheHierarchy;
use super::types::{Hit, LevelSnapshot};
use crate::cache::CacheStats;

/// Thread-shareable handle to a single hierarchy.
///
/// One lock guards the whole hierarchy, so a lookup and its promotion
/// fan-out are never interleaved with another caller's operation.
pub struct SharedHierarchy<K, V> {
    inner: Arc<Mutex<CacheHierarchy<K, V>>>,
}

impl<K, V> Clone for SharedHierarchy<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new(hierarchy: CacheHierarchy<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(hierarchy)),
        }
    }

    pub fn add_level(&self, capacity: i64, policy: &str) -> Result<usize> {
        self.inner.lock().add_level(capacity, policy)
    }

    pub fn remove_level(&self, index: usize) -> Result<()> {
        self.inner.lock().remove_level(index)
    }

    pub fn get(&self, key: &K) -> Option<Hit<V>> {
        self.inner.lock().get(key)
    }

    pub fn put(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().put(key, value)
    }

    pub fn snapshot_all(&self) -> Vec<(usize, LevelSnapshot<K, V>)> {
        self.inner.lock().snapshot_all()
    }

    pub fn stats(&self) -> Vec<(usize, CacheStats)> {
        self.inner.lock().stats()
    }

    pub fn level_count(&self) -> usize {
        self.inner.lock().level_count()
    }

    /// Run several operations under a single lock acquisition
    pub fn with<R>(&self, f: impl FnOnce(&mut CacheHierarchy<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<K, V> SharedHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + Display + 'static,
    V: Clone + Send + Display + 'static,
{
    pub fn display(&self) -> String {
        self.inner.lock().display()
    }
}

impl<K, V> Default for SharedHierarchy<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(CacheHierarchy::new())
    }
}
