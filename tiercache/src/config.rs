use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::core::CacheHierarchy;

/// Top-level configuration for a cache hierarchy and its front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Levels in order, level 1 first
    #[serde(default)]
    pub levels: Vec<LevelConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub capacity: i64,
    /// Eviction policy name, LRU or LFU in any case
    pub policy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LevelConfig {
    pub fn new(capacity: i64, policy: impl Into<String>) -> Self {
        Self {
            capacity,
            policy: policy.into(),
        }
    }

    /// Parse the `CAPACITY:POLICY` form used on the command line
    pub fn parse_spec(spec: &str) -> anyhow::Result<Self> {
        let (capacity, policy) = spec
            .split_once(':')
            .with_context(|| format!("Level spec '{}' must look like CAPACITY:POLICY", spec))?;
        let capacity = capacity
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid capacity in level spec '{}'", spec))?;
        Ok(Self::new(capacity, policy.trim()))
    }
}

impl CacheConfig {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CacheConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Build a hierarchy with the configured levels, in order
    pub fn build_hierarchy(&self) -> anyhow::Result<CacheHierarchy<String, String>> {
        let mut hierarchy = CacheHierarchy::new();
        for (i, level) in self.levels.iter().enumerate() {
            hierarchy
                .add_level(level.capacity, &level.policy)
                .with_context(|| format!("Invalid configuration for level {}", i + 1))?;
        }
        debug!("Built cache hierarchy with {} levels", hierarchy.level_count());
        Ok(hierarchy)
    }
}
