//! # `OperationEnvelope`
//!
//! The execution context every inbound operation arrives in.
//!
//! ## Security Properties
//!
//! - **Envelope Authority**: `origin` is the sole source of truth for the
//!   caller's identity. It is filled in by the execution environment (the
//!   account that signed the transaction), never by the payload author.
//! - **Versioning**: All envelopes carry a `version` for forward compatibility.
//! - **Correlation**: `correlation_id` ties a result back to its operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::AccountId;
use crate::errors::EnvelopeError;

/// The universal wrapper for inbound operations.
///
/// # Invariants
///
/// - `origin` is `None` only if the environment failed to attribute the
///   operation; consumers treat that as a fatal integrity error.
/// - Payloads MUST NOT carry a redundant caller field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationEnvelope<T> {
    /// Protocol version. MUST be checked before processing.
    pub version: u16,

    /// The originating account of this operation, as attributed by the
    /// execution environment.
    pub origin: Option<AccountId>,

    /// Unique identifier for correlating the result with the operation.
    pub correlation_id: Uuid,

    /// Unix timestamp (seconds) at which the environment delivered the operation.
    pub timestamp: u64,

    /// The operation payload.
    pub payload: T,
}

impl<T> OperationEnvelope<T> {
    /// Current protocol version.
    pub const CURRENT_VERSION: u16 = 1;

    /// Wrap a payload originating from `origin`.
    pub fn new(origin: AccountId, payload: T) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            origin: Some(origin),
            correlation_id: Uuid::new_v4(),
            timestamp: current_timestamp(),
            payload,
        }
    }

    /// Wrap a payload with no attributed origin.
    pub fn unattributed(payload: T) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            origin: None,
            correlation_id: Uuid::new_v4(),
            timestamp: current_timestamp(),
            payload,
        }
    }

    /// Reject envelopes from an unsupported protocol version.
    pub fn check_version(&self) -> Result<(), EnvelopeError> {
        if self.version != Self::CURRENT_VERSION {
            return Err(EnvelopeError::UnsupportedVersion {
                received: self.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        Ok(())
    }
}

fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
