//! # Domain Entities
//!
//! Path and configuration records owned by the registry and the
//! configuration store.

use super::errors::UlnError;
use super::value_objects::{ConnectionState, Direction, PathId, UlnManagerConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{AccountId, Eid, ACCOUNT_ID_LEN};
use std::fmt;

/// Identity of a directional connection between two OApps on two chains.
///
/// The 4-tuple is the unique key of a path record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathKey {
    /// Source endpoint.
    pub src_eid: Eid,
    /// Source OApp. Owns the path and its Send configuration.
    pub src_oapp: AccountId,
    /// Destination endpoint.
    pub dst_eid: Eid,
    /// Destination OApp. Owns the Receive configuration.
    pub dst_oapp: AccountId,
}

impl PathKey {
    /// Length of the canonical encoding: two 4-byte EIDs and two 32-byte accounts.
    pub const ENCODED_LEN: usize = 4 + ACCOUNT_ID_LEN + 4 + ACCOUNT_ID_LEN;

    /// Create a path key.
    pub fn new(src_eid: Eid, src_oapp: AccountId, dst_eid: Eid, dst_oapp: AccountId) -> Self {
        Self {
            src_eid,
            src_oapp,
            dst_eid,
            dst_oapp,
        }
    }

    /// Canonical big-endian encoding `srcEid ‖ srcOApp ‖ dstEid ‖ dstOApp`.
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0..4].copy_from_slice(&self.src_eid.to_be_bytes());
        out[4..36].copy_from_slice(self.src_oapp.as_bytes());
        out[36..40].copy_from_slice(&self.dst_eid.to_be_bytes());
        out[40..72].copy_from_slice(self.dst_oapp.as_bytes());
        out
    }

    /// The OApp that owns the given direction of this path.
    pub fn owner(&self, direction: Direction) -> &AccountId {
        match direction {
            Direction::Send => &self.src_oapp,
            Direction::Receive => &self.dst_oapp,
        }
    }

    /// Derive the path id.
    pub fn path_id(&self) -> PathId {
        let mut hasher = Sha256::new();
        hasher.update(self.encode());
        PathId(hasher.finalize().into())
    }

    /// Structural validation applied before a path is created.
    pub fn validate(&self, config: &UlnManagerConfig) -> Result<(), UlnError> {
        if config.reject_zero_eid && (self.src_eid.0 == 0 || self.dst_eid.0 == 0) {
            return Err(UlnError::InvalidPathKey("endpoint id must be non-zero"));
        }
        if config.reject_zero_account && (self.src_oapp.is_zero() || self.dst_oapp.is_zero()) {
            return Err(UlnError::InvalidPathKey("oapp must be non-zero"));
        }
        Ok(())
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{}",
            self.src_eid,
            self.src_oapp.short(),
            self.dst_eid,
            self.dst_oapp.short()
        )
    }
}

/// A deployed path record.
///
/// Fields are private: the tuple is immutable once the record exists and only
/// the registry constructs records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    id: PathId,
    key: PathKey,
}

impl Path {
    pub(crate) fn new(key: PathKey) -> Self {
        Self {
            id: key.path_id(),
            key,
        }
    }

    /// Path id assigned at creation.
    pub fn id(&self) -> PathId {
        self.id
    }

    /// The 4-tuple identifying this path.
    pub fn key(&self) -> &PathKey {
        &self.key
    }

    /// Source OApp (path owner).
    pub fn src_oapp(&self) -> &AccountId {
        &self.key.src_oapp
    }

    /// Destination OApp.
    pub fn dst_oapp(&self) -> &AccountId {
        &self.key.dst_oapp
    }
}

/// Verification configuration for one direction of one path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Which side this configures.
    pub direction: Direction,
    /// Incremented on every successful update; 1 after the first.
    pub version: u64,
    /// Opaque library-specific verification parameters.
    pub payload: Vec<u8>,
}

impl PathConfig {
    /// First configuration for a direction.
    pub(crate) fn initial(direction: Direction, payload: Vec<u8>) -> Self {
        Self {
            direction,
            version: 1,
            payload,
        }
    }

    /// The configuration that replaces `self`, or `None` if the version
    /// counter is exhausted.
    pub(crate) fn next(&self, payload: Vec<u8>) -> Option<Self> {
        Some(Self {
            direction: self.direction,
            version: self.version.checked_add(1)?,
            payload,
        })
    }
}

/// Read-side view of a path's lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether the path exists.
    pub state: ConnectionState,
    /// Version of the Send configuration, if set.
    pub send_version: Option<u64>,
    /// Version of the Receive configuration, if set.
    pub receive_version: Option<u64>,
}

impl ConnectionStatus {
    /// Status of a path with no record.
    pub fn undeployed() -> Self {
        Self::default()
    }

    /// True once the Send side has been configured.
    pub fn send_configured(&self) -> bool {
        self.send_version.is_some()
    }

    /// True once the Receive side has been configured.
    pub fn receive_configured(&self) -> bool {
        self.receive_version.is_some()
    }
}
