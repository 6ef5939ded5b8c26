// Configuration Module Tests
// Tests for CacheConfig loading, defaults, and hierarchy construction

use std::fs;
use tiercache::{CacheConfig, CacheError, EvictionPolicy, LevelConfig};

#[test]
fn test_config_default_values() {
    let config = CacheConfig::default();

    assert!(config.levels.is_empty());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiercache.yml");
    fs::write(
        &path,
        r#"
levels:
  - capacity: 2
    policy: LRU
  - capacity: 16
    policy: lfu
logging:
  level: debug
  format: json
"#,
    )
    .unwrap();

    let config = CacheConfig::from_file(&path).unwrap();
    assert_eq!(config.levels.len(), 2);
    assert_eq!(config.levels[0], LevelConfig::new(2, "LRU"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");

    let hierarchy = config.build_hierarchy().unwrap();
    assert_eq!(
        hierarchy.policies(),
        vec![EvictionPolicy::Lru, EvictionPolicy::Lfu]
    );
}

#[test]
fn test_config_logging_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels-only.yml");
    fs::write(&path, "levels:\n  - capacity: 4\n    policy: lru\n").unwrap();

    let config = CacheConfig::from_file(&path).unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.levels.len(), 1);
}

#[test]
fn test_config_missing_file() {
    let err = CacheConfig::from_file("/nonexistent/tiercache.yml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_config_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "levels: [ capacity: ").unwrap();

    let err = CacheConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_config_invalid_policy_surfaces() {
    let config = CacheConfig {
        levels: vec![LevelConfig::new(2, "LRU"), LevelConfig::new(2, "random")],
        ..Default::default()
    };

    let err = config.build_hierarchy().err().unwrap();
    assert!(err.to_string().contains("level 2"));
    assert_eq!(
        err.downcast_ref::<CacheError>(),
        Some(&CacheError::InvalidPolicy("random".to_string()))
    );
}

#[test]
fn test_level_spec_parsing() {
    assert_eq!(
        LevelConfig::parse_spec("8:lfu").unwrap(),
        LevelConfig::new(8, "lfu")
    );
    assert_eq!(
        LevelConfig::parse_spec(" 3 : LRU ").unwrap(),
        LevelConfig::new(3, "LRU")
    );
    assert!(LevelConfig::parse_spec("lru").is_err());
    assert!(LevelConfig::parse_spec("big:lru").is_err());
}
