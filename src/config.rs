//! Runtime configuration, loadable from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{TallyError, TallyResult};

/// Default number of entries returned by a popularity query.
pub const DEFAULT_POPULAR_SIZE: usize = 3;

/// Complete configuration. Every field has a default, so a partial file
/// (or none at all) is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Dataset loading configuration
    pub load: LoadConfig,

    /// Query configuration
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Log and skip malformed dataset lines instead of failing the load
    pub skip_malformed: bool,

    /// Read the dataset through a memory map instead of buffered IO
    pub use_mmap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Entries returned by `popular` when no size is given
    pub default_popular_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_popular_size: DEFAULT_POPULAR_SIZE,
        }
    }
}

impl TallyConfig {
    /// Read a configuration from a JSON file.
    pub fn from_file(path: &Path) -> TallyResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Decode a configuration from JSON text.
    pub fn from_json(data: &str) -> TallyResult<Self> {
        let config: Self =
            serde_json::from_str(data).map_err(|e| TallyError::Config(e.to_string()))?;
        if config.query.default_popular_size == 0 {
            return Err(TallyError::Config(
                "query.default_popular_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
