//! IPC message handler for the ULN Manager.
//!
//! Every inbound operation passes, in order, through: envelope version
//! check, identity resolution from the envelope origin, typed payload
//! decode, then dispatch to the service.

use super::payloads::Operation;
use crate::domain::{
    ConnectionStatus, Direction, Path, PathConfig, PathId, UlnError, UlnManagerConfig,
};
use crate::identity::resolve_caller;
use crate::ports::UlnManagerApi;
use serde::{Deserialize, Serialize};
use shared_types::OperationEnvelope;
use tracing::debug;

/// Raw wire operation as delivered by the transport.
pub type RawOperation = OperationEnvelope<Vec<u8>>;

/// Outcome of a successfully handled operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationResult {
    /// A path was created.
    PathDeployed {
        /// Identifier of the new path.
        path_id: PathId,
    },
    /// A configuration was written.
    ConfigVersion {
        /// Side written.
        direction: Direction,
        /// New version.
        version: u64,
    },
    /// A path record.
    Path(Path),
    /// A configuration record.
    Config(PathConfig),
    /// Lifecycle state of a path.
    Status(ConnectionStatus),
}

/// ULN Manager IPC handler.
///
/// Wraps any `UlnManagerApi` with the envelope boundary.
pub struct UlnManagerHandler<S: UlnManagerApi> {
    service: S,
    config: UlnManagerConfig,
}

impl<S: UlnManagerApi> UlnManagerHandler<S> {
    /// Create a handler decoding with `config` limits.
    pub fn new(service: S, config: UlnManagerConfig) -> Self {
        Self { service, config }
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Handle one raw operation.
    pub fn handle(&self, envelope: &RawOperation) -> Result<OperationResult, UlnError> {
        envelope.check_version()?;
        let caller = resolve_caller(envelope)?;
        let operation = Operation::decode(&envelope.payload, &self.config)?;

        debug!(
            "[uln] {} opcode {} from {}",
            envelope.correlation_id,
            operation.opcode(),
            caller.account().short()
        );

        match operation {
            Operation::DeployConnection(key) => self
                .service
                .deploy_connection(&caller, key)
                .map(|path_id| OperationResult::PathDeployed { path_id }),
            Operation::SetSendConfig { key, payload } => self
                .service
                .set_send_config(&caller, &key, payload)
                .map(|version| OperationResult::ConfigVersion {
                    direction: Direction::Send,
                    version,
                }),
            Operation::SetReceiveConfig { key, payload } => self
                .service
                .set_receive_config(&caller, &key, payload)
                .map(|version| OperationResult::ConfigVersion {
                    direction: Direction::Receive,
                    version,
                }),
            Operation::LookupPath(key) => self.service.lookup_path(&key).map(OperationResult::Path),
            Operation::GetConfig { key, direction } => self
                .service
                .get_config(&key, direction)
                .map(OperationResult::Config),
            Operation::ConnectionStatus(key) => self
                .service
                .connection_status(&key)
                .map(OperationResult::Status),
        }
    }
}
