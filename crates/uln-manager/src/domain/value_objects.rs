//! # Domain Value Objects
//!
//! Immutable value types for the ULN Manager.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{AccountId, Hash};
use std::fmt;

/// Direction of a path configuration.
///
/// Each side of a path configures its own verification: the source OApp owns
/// the Send side, the destination OApp owns the Receive side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Outbound verification, owned by `src_oapp`.
    Send,
    /// Inbound verification, owned by `dst_oapp`.
    Receive,
}

impl Direction {
    /// Discriminant byte used in storage keys and on the wire.
    pub fn as_byte(self) -> u8 {
        match self {
            Direction::Send => 0,
            Direction::Receive => 1,
        }
    }

    /// Parse a discriminant byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Direction::Send),
            1 => Some(Direction::Receive),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Send => write!(f, "send"),
            Direction::Receive => write!(f, "receive"),
        }
    }
}

/// Stable identifier of a deployed path: SHA-256 of the encoded path key.
///
/// Serialized as a `0x` hex string in human-readable formats.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(pub Hash);

impl Serialize for PathId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for PathId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            return Hash::deserialize(deserializer).map(PathId);
        }
        let text = String::deserialize(deserializer)?;
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        let bytes = hex::decode(digits).map_err(de::Error::custom)?;
        let hash: Hash = bytes
            .try_into()
            .map_err(|_| de::Error::custom("path id must be 32 bytes"))?;
        Ok(PathId(hash))
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathId(0x{}…)", hex::encode(&self.0[..4]))
    }
}

/// Authenticated identity of the account that issued the current operation.
///
/// Only the identity resolver can produce one, and only from an execution
/// context. It is never stored and never read from a payload.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity(AccountId);

impl CallerIdentity {
    pub(crate) fn from_origin(origin: AccountId) -> Self {
        Self(origin)
    }

    /// The account behind this caller.
    pub fn account(&self) -> &AccountId {
        &self.0
    }
}

impl fmt::Debug for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallerIdentity({})", self.0.short())
    }
}

/// Lifecycle state of a path.
///
/// Send and Receive configuration are independent sub-states of `Deployed`;
/// see `ConnectionStatus`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No record exists for the 4-tuple.
    #[default]
    Undeployed,
    /// A path record exists.
    Deployed,
}

/// Manager configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UlnManagerConfig {
    /// Largest configuration payload accepted, in bytes.
    pub max_config_payload_bytes: usize,
    /// Reject path keys with a zero endpoint id.
    pub reject_zero_eid: bool,
    /// Reject path keys naming the all-zero account.
    pub reject_zero_account: bool,
}

impl Default for UlnManagerConfig {
    fn default() -> Self {
        Self {
            max_config_payload_bytes: 4096,
            reject_zero_eid: true,
            reject_zero_account: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_byte_mapping() {
        assert_eq!(Direction::Send.as_byte(), 0);
        assert_eq!(Direction::Receive.as_byte(), 1);
        assert_eq!(Direction::from_byte(1), Some(Direction::Receive));
        assert_eq!(Direction::from_byte(2), None);
    }

    #[test]
    fn test_default_config() {
        let config = UlnManagerConfig::default();
        assert_eq!(config.max_config_payload_bytes, 4096);
        assert!(config.reject_zero_eid);
        assert!(config.reject_zero_account);
    }

    #[test]
    fn test_default_state_is_undeployed() {
        assert_eq!(ConnectionState::default(), ConnectionState::Undeployed);
    }

    #[test]
    fn test_path_id_json_is_hex() {
        let id = PathId([0x11; 32]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "11".repeat(32)));
        assert_eq!(serde_json::from_str::<PathId>(&json).unwrap(), id);
        assert!(serde_json::from_str::<PathId>("\"0x1234\"").is_err());
    }
}
