//! # Domain Errors
//!
//! Error types for the ULN Manager.
//!
//! ## Propagation
//!
//! Every rejection is value-returned unchanged to the caller. A rejected
//! operation has not written anything to the store.

use super::entities::PathKey;
use super::value_objects::Direction;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, EnvelopeError};
use thiserror::Error;

/// ULN Manager error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UlnError {
    /// Claimed owner differs from the resolved caller.
    #[error("Unauthorized: caller {caller} is not owner {claimed_owner}")]
    Unauthorized {
        /// The OApp the operation acts for.
        claimed_owner: AccountId,
        /// The account that issued the operation.
        caller: AccountId,
    },

    /// Deploy attempted for an existing 4-tuple.
    #[error("Path already exists: {0}")]
    PathAlreadyExists(PathKey),

    /// Operation on a path with no record.
    #[error("Path not found: {0}")]
    NotFound(PathKey),

    /// Query for a direction that was never configured.
    #[error("No {direction} config for path {key}")]
    ConfigNotFound {
        /// Path queried.
        key: PathKey,
        /// Direction queried.
        direction: Direction,
    },

    /// Execution context carried no origin account.
    #[error("Malformed context: operation has no origin account")]
    MalformedContext,

    /// Path key fails structural validation.
    #[error("Invalid path key: {0}")]
    InvalidPathKey(&'static str),

    /// Configuration payload over the configured limit.
    #[error("Config payload too large: {len} bytes, max {max}")]
    PayloadTooLarge {
        /// Payload length.
        len: usize,
        /// Limit.
        max: usize,
    },

    /// Version counter cannot advance further.
    #[error("{direction} config version exhausted for path {key}")]
    VersionExhausted {
        /// Path.
        key: PathKey,
        /// Direction.
        direction: Direction,
    },

    /// Stored bytes could not be decoded.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Storage substrate failure.
    #[error(transparent)]
    Storage(#[from] KVStoreError),

    /// Inbound payload failed typed decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Envelope failed validation.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Coarse error category reported to callers and in events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Claimed owner != caller.
    Unauthorized,
    /// Path already deployed.
    PathAlreadyExists,
    /// Path or config missing.
    NotFound,
    /// No origin in the execution context.
    MalformedContext,
    /// Input rejected before reaching any state (decode, validation, limits).
    Rejected,
    /// Storage failure or corruption.
    Storage,
}

impl UlnError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UlnError::Unauthorized { .. } => ErrorKind::Unauthorized,
            UlnError::PathAlreadyExists(_) => ErrorKind::PathAlreadyExists,
            UlnError::NotFound(_) | UlnError::ConfigNotFound { .. } => ErrorKind::NotFound,
            UlnError::MalformedContext => ErrorKind::MalformedContext,
            UlnError::InvalidPathKey(_)
            | UlnError::PayloadTooLarge { .. }
            | UlnError::VersionExhausted { .. }
            | UlnError::Decode(_)
            | UlnError::Envelope(_) => ErrorKind::Rejected,
            UlnError::CorruptRecord(_) | UlnError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Integrity failures of the surrounding environment or the store.
    /// Not recoverable inside the manager.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UlnError::MalformedContext
                | UlnError::CorruptRecord(_)
                | UlnError::Storage(KVStoreError::Corruption { .. })
        )
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io {
        /// Underlying error text.
        message: String,
    },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    Corruption {
        /// Description.
        message: String,
    },
}

/// Typed decode errors for inbound operation payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload ended early.
    #[error("Truncated payload: need {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the next field.
        needed: usize,
        /// Bytes left.
        remaining: usize,
    },

    /// Opcode not recognised.
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u32),

    /// Bytes left after the last field.
    #[error("{0} trailing bytes after operation")]
    TrailingBytes(usize),

    /// Direction byte not 0 or 1.
    #[error("Invalid direction byte: {0}")]
    InvalidDirection(u8),

    /// Declared config length over the limit.
    #[error("Config payload too large: {len} bytes, max {max}")]
    PayloadTooLarge {
        /// Declared length.
        len: usize,
        /// Limit.
        max: usize,
    },

    /// An endpoint id field is zero.
    #[error("Endpoint id must be non-zero")]
    ZeroEid,

    /// An account field is the zero account.
    #[error("Account id must be non-zero")]
    ZeroAccount,
}
