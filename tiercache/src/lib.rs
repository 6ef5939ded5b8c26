pub mod cache;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use cache::{CacheLevel, CacheStats, FrequencyCache, RecencyCache, new_level};
pub use config::{CacheConfig, LevelConfig, LoggingConfig};
pub use self::core::{
    CacheError, CacheHierarchy, EntrySnapshot, EvictionPolicy, Hit, LevelSnapshot, Result,
    SharedHierarchy,
};
