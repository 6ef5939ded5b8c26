pub mod error;
pub mod hierarchy;
pub mod shared;
pub mod types;

pub use error::{CacheError, Result};
pub use hierarchy::CacheHierarchy;
pub use shared::SharedHierarchy;
pub use types::{EntrySnapshot, EvictionPolicy, Hit, LevelSnapshot};
