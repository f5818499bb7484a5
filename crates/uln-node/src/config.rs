//! # Node Configuration
//!
//! Runtime parameters for the operator binary.
//!
//! ## Environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ULN_DATA_DIR` | `storage.data_dir` |
//! | `ULN_OPERATIONS` | `operations` (stdin when unset) |
//! | `ULN_MAX_CONFIG_BYTES` | `manager.max_config_payload_bytes` |
//!
//! Unparseable values are logged and ignored.

use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use uln_manager::UlnManagerConfig;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// File of JSON-lines operations; stdin when `None`.
    pub operations: Option<PathBuf>,
    /// Manager limits.
    pub manager: UlnManagerConfig,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory holding the store and its lock.
    pub data_dir: PathBuf,
    /// Store file name inside `data_dir`.
    pub store_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store_file: "uln.store".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero payload limit would reject every configuration.
    #[error("max_config_payload_bytes must be non-zero")]
    ZeroPayloadLimit,

    /// The store file name is empty.
    #[error("store file name must not be empty")]
    EmptyStoreFile,
}

impl NodeConfig {
    /// Load defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load defaults overridden by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("ULN_DATA_DIR") {
            info!("[uln] data dir from environment: {}", dir);
            config.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(path) = lookup("ULN_OPERATIONS") {
            config.operations = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup("ULN_MAX_CONFIG_BYTES") {
            match raw.parse() {
                Ok(max) => config.manager.max_config_payload_bytes = max,
                Err(_) => warn!("[uln] ignoring invalid ULN_MAX_CONFIG_BYTES: {}", raw),
            }
        }

        config
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manager.max_config_payload_bytes == 0 {
            return Err(ConfigError::ZeroPayloadLimit);
        }
        if self.storage.store_file.is_empty() {
            return Err(ConfigError::EmptyStoreFile);
        }
        Ok(())
    }

    /// Full path of the store file.
    pub fn store_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.store_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = NodeConfig::from_lookup(lookup(&[]));
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.store_path(), PathBuf::from("./data/uln.store"));
        assert!(config.operations.is_none());
        assert_eq!(config.manager, UlnManagerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = NodeConfig::from_lookup(lookup(&[
            ("ULN_DATA_DIR", "/var/lib/uln"),
            ("ULN_OPERATIONS", "ops.jsonl"),
            ("ULN_MAX_CONFIG_BYTES", "128"),
        ]));
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/uln"));
        assert_eq!(config.operations, Some(PathBuf::from("ops.jsonl")));
        assert_eq!(config.manager.max_config_payload_bytes, 128);
    }

    #[test]
    fn test_invalid_limit_ignored() {
        let config = NodeConfig::from_lookup(lookup(&[("ULN_MAX_CONFIG_BYTES", "lots")]));
        assert_eq!(config.manager.max_config_payload_bytes, 4096);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = NodeConfig::from_lookup(lookup(&[("ULN_MAX_CONFIG_BYTES", "0")]));
        assert_eq!(config.validate(), Err(ConfigError::ZeroPayloadLimit));
    }
}
