//! Search configuration, loadable from TOML.
//!
//! ```toml
//! depth = 3
//!
//! [cache]
//! policy = "persistent"   # or "per-search"
//! max_entries = 2000000   # omit for an unbounded cache
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Lifetime of the transposition cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Kept across searches until the next game
    #[default]
    Persistent,
    /// Emptied at the start of every search
    PerSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub policy: CachePolicy,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched when the caller does not ask for a depth
    pub depth: u8,
    pub cache: CacheConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            cache: CacheConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        if config.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
