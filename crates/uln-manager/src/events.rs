//! # Domain Events
//!
//! Emitted after each successful mutation and for each rejected one.

use crate::domain::{Direction, ErrorKind, PathId, PathKey};
use serde::{Deserialize, Serialize};
use shared_types::AccountId;

/// Operation kinds that can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    /// `deploy_connection`
    Deploy,
    /// `set_send_config`
    SetSendConfig,
    /// `set_receive_config`
    SetReceiveConfig,
}

impl From<Direction> for MutationKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Send => MutationKind::SetSendConfig,
            Direction::Receive => MutationKind::SetReceiveConfig,
        }
    }
}

/// ULN Manager events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UlnEvent {
    /// A path record was created.
    PathDeployed {
        /// Assigned id.
        path_id: PathId,
        /// The 4-tuple.
        key: PathKey,
    },
    /// The Send config of a path changed.
    SendConfigUpdated {
        /// Path.
        key: PathKey,
        /// New version.
        version: u64,
    },
    /// The Receive config of a path changed.
    ReceiveConfigUpdated {
        /// Path.
        key: PathKey,
        /// New version.
        version: u64,
    },
    /// A mutation was rejected; nothing was written.
    OperationRejected {
        /// Which mutation.
        operation: MutationKind,
        /// Path it targeted.
        key: PathKey,
        /// Who issued it.
        caller: AccountId,
        /// Why.
        kind: ErrorKind,
    },
}

impl UlnEvent {
    /// Event for a successful config update.
    pub fn config_updated(key: PathKey, direction: Direction, version: u64) -> Self {
        match direction {
            Direction::Send => UlnEvent::SendConfigUpdated { key, version },
            Direction::Receive => UlnEvent::ReceiveConfigUpdated { key, version },
        }
    }
}
