use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::CacheError;

/// Eviction policy chosen per cache level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least Recently Used
    Lru,
    /// Least Frequently Used, oldest access breaks ties
    Lfu,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            p if p.eq_ignore_ascii_case("lru") => Ok(Self::Lru),
            p if p.eq_ignore_ascii_case("lfu") => Ok(Self::Lfu),
            other => Err(CacheError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of one cached entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot<K, V> {
    pub key: K,
    pub value: V,
    /// Access count (LFU levels only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u64>,
    /// Logical tick of the last access (LFU levels only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access: Option<u64>,
}

impl<K, V> EntrySnapshot<K, V> {
    /// Entry of a recency-ordered level; position carries the metadata
    pub fn recency(key: K, value: V) -> Self {
        Self {
            key,
            value,
            frequency: None,
            last_access: None,
        }
    }

    /// Entry of a frequency-ordered level
    pub fn frequency(key: K, value: V, frequency: u64, last_access: u64) -> Self {
        Self {
            key,
            value,
            frequency: Some(frequency),
            last_access: Some(last_access),
        }
    }
}

/// Ordered view of a single level.
///
/// LRU levels list entries least-recent first, LFU levels in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSnapshot<K, V> {
    pub policy: EvictionPolicy,
    pub capacity: usize,
    pub entries: Vec<EntrySnapshot<K, V>>,
}

impl<K, V> LevelSnapshot<K, V> {
    /// Keys in snapshot order
    pub fn keys(&self) -> Vec<&K> {
        self.entries.iter().map(|e| &e.key).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for LevelSnapshot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Cache: {{", self.policy)?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", entry.key, entry.value)?;
            if let (Some(freq), Some(tick)) = (entry.frequency, entry.last_access) {
                write!(f, " (freq={freq}, tick={tick})")?;
            }
        }
        f.write_str("}")
    }
}

/// Successful hierarchy lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit<V> {
    pub value: V,
    /// 1-based level the value was found at
    pub level: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_case_insensitive() {
        assert_eq!("LRU".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
        assert_eq!("lfu".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lfu));
        assert_eq!(" Lru ".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
        assert_eq!(
            "FIFO".parse::<EvictionPolicy>(),
            Err(CacheError::InvalidPolicy("FIFO".to_string()))
        );
    }

    #[test]
    fn test_snapshot_display() {
        let lru = LevelSnapshot {
            policy: EvictionPolicy::Lru,
            capacity: 2,
            entries: vec![
                EntrySnapshot::recency("a", "1"),
                EntrySnapshot::recency("b", "2"),
            ],
        };
        assert_eq!(lru.to_string(), "LRU Cache: {a=1, b=2}");

        let lfu = LevelSnapshot {
            policy: EvictionPolicy::Lfu,
            capacity: 2,
            entries: vec![EntrySnapshot::frequency("a", "1", 3, 7)],
        };
        assert_eq!(lfu.to_string(), "LFU Cache: {a=1 (freq=3, tick=7)}");
    }

    #[test]
    fn test_empty_snapshot_display() {
        let snapshot: LevelSnapshot<String, String> = LevelSnapshot {
            policy: EvictionPolicy::Lfu,
            capacity: 0,
            entries: Vec::new(),
        };
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_string(), "LFU Cache: {}");
    }
}
