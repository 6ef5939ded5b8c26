use thiserror::Error;

/// Main error type for cache hierarchy operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Invalid eviction policy: {0} (expected LRU or LFU)")]
    InvalidPolicy(String),

    #[error("Invalid cache level: {index} (hierarchy has {levels} levels)")]
    InvalidLevel { index: usize, levels: usize },

    #[error("Invalid capacity: {0} (must be positive)")]
    InvalidCapacity(i64),

    #[error("No cache levels available")]
    EmptyHierarchy,

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

impl CacheError {
    /// Short machine-friendly code, used by the shell for status lines
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPolicy(_) => "INVALID_POLICY",
            Self::InvalidLevel { .. } => "INVALID_LEVEL",
            Self::InvalidCapacity(_) => "INVALID_CAPACITY",
            Self::EmptyHierarchy => "EMPTY_HIERARCHY",
            Self::KeyNotFound(_) => "KEY_NOT_FOUND",
        }
    }

    /// A miss is reported like an error but is a normal outcome
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidPolicy("FIFO".to_string()).to_string(),
            "Invalid eviction policy: FIFO (expected LRU or LFU)"
        );
        assert_eq!(
            CacheError::InvalidLevel {
                index: 4,
                levels: 2
            }
            .to_string(),
            "Invalid cache level: 4 (hierarchy has 2 levels)"
        );
        assert_eq!(
            CacheError::EmptyHierarchy.to_string(),
            "No cache levels available"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CacheError::InvalidCapacity(0).code(), "INVALID_CAPACITY");
        assert_eq!(CacheError::EmptyHierarchy.code(), "EMPTY_HIERARCHY");
        assert!(CacheError::KeyNotFound("a".into()).is_miss());
        assert!(!CacheError::EmptyHierarchy.is_miss());
    }
}
