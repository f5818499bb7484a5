//! # Storage Keys
//!
//! Deterministic encoding of path and config keys for the key-value
//! substrate. EIDs are big-endian so keys for one source sort together.

use super::entities::PathKey;
use super::value_objects::Direction;
use shared_types::{AccountId, Eid};

/// Key namespaces in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Path record: `path:{tuple}` -> Path
    Path,
    /// Path config: `cfg:{tuple}{direction}` -> PathConfig
    Config,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Path => b"path:",
            KeyPrefix::Config => b"cfg:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Key of a path record.
    pub fn path_key(key: &PathKey) -> Vec<u8> {
        KeyPrefix::Path.key(&key.encode())
    }

    /// Key of a path config; the direction byte is the extra discriminant.
    pub fn config_key(key: &PathKey, direction: Direction) -> Vec<u8> {
        let mut out = KeyPrefix::Config.key(&key.encode());
        out.push(direction.as_byte());
        out
    }

    /// Prefix shared by every path deployed by one source OApp.
    pub fn source_prefix(src_eid: Eid, src_oapp: &AccountId) -> Vec<u8> {
        let mut out = KeyPrefix::Path.key(&src_eid.to_be_bytes());
        out.extend_from_slice(src_oapp.as_bytes());
        out
    }
}
