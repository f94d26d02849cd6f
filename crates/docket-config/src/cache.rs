//! Symbol cache configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default number of (document, version) entries kept.
const fn default_capacity() -> usize {
    50
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Most symbol trees kept before the least recently used is evicted.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.capacity".to_string(),
                reason: "must hold at least one entry".to_string(),
            });
        }
        Ok(())
    }
}
