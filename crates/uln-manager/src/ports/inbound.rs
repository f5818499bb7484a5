//! # Inbound Ports
//!
//! API trait defining what the ULN Manager can do.
//!
//! Every mutating call takes the caller as an explicit `CallerIdentity`
//! argument; nothing reads an ambient "current caller".

use crate::domain::{
    CallerIdentity, ConnectionStatus, Direction, Path, PathConfig, PathId, PathKey, UlnError,
};
use shared_types::{AccountId, Eid};

/// ULN Manager API - inbound port.
pub trait UlnManagerApi: Send + Sync {
    /// Deploy a path. `key.src_oapp` is the claimed owner and must be the caller.
    /// The destination OApp's consent is not required at this step.
    fn deploy_connection(&self, caller: &CallerIdentity, key: PathKey)
        -> Result<PathId, UlnError>;

    /// Create or update the Send config. Caller must be `key.src_oapp`.
    /// Returns the new version.
    fn set_send_config(
        &self,
        caller: &CallerIdentity,
        key: &PathKey,
        payload: Vec<u8>,
    ) -> Result<u64, UlnError>;

    /// Create or update the Receive config. Caller must be `key.dst_oapp`.
    /// Returns the new version.
    fn set_receive_config(
        &self,
        caller: &CallerIdentity,
        key: &PathKey,
        payload: Vec<u8>,
    ) -> Result<u64, UlnError>;

    /// Get a path record.
    fn lookup_path(&self, key: &PathKey) -> Result<Path, UlnError>;

    /// Get the config for one direction of a path.
    fn get_config(&self, key: &PathKey, direction: Direction) -> Result<PathConfig, UlnError>;

    /// Lifecycle status of a path. Never fails with `NotFound`.
    fn connection_status(&self, key: &PathKey) -> Result<ConnectionStatus, UlnError>;

    /// All paths deployed by a source OApp on a source endpoint.
    fn paths_from(&self, src_eid: Eid, src_oapp: &AccountId) -> Result<Vec<Path>, UlnError>;
}
