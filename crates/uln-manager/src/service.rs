//! # ULN Manager Service
//!
//! The connection lifecycle controller implementing `UlnManagerApi`.
//!
//! ## Lifecycle (per path)
//!
//! ```text
//! Undeployed ──deploy_connection──→ Deployed ─┬─set_send_config────→ Send configured
//!                                             └─set_receive_config─→ Receive configured
//! ```
//!
//! The two configuration sub-states are independent; either may complete
//! first, repeatedly, or never.
//!
//! ## Guarantees
//!
//! - The guard runs before every mutation, with the owner of the side being
//!   touched as the claimed owner.
//! - Each operation holds the store lock for its whole state transition; the
//!   lock guard releases on every exit path.
//! - Writes are staged and committed in one atomic batch after every check
//!   has passed, so a rejected operation leaves the store unchanged.
//! - Events are published after the store lock is released.

use crate::adapters::NoopEventSink;
use crate::config_store::ConfigStore;
use crate::domain::{
    authorize, CallerIdentity, ConnectionState, ConnectionStatus, Direction, Path, PathConfig,
    PathId, PathKey, UlnError, UlnManagerConfig,
};
use crate::events::{MutationKind, UlnEvent};
use crate::ports::{EventSink, KeyValueStore, UlnManagerApi};
use crate::registry::PathRegistry;
use parking_lot::Mutex;
use shared_types::{AccountId, Eid};
use tracing::{debug, info, warn};

/// The ULN Manager service.
pub struct UlnManagerService<KV, ES = NoopEventSink>
where
    KV: KeyValueStore,
    ES: EventSink,
{
    /// Whole-store exclusive access.
    store: Mutex<KV>,
    /// Domain event sink.
    events: ES,
    /// Service configuration.
    config: UlnManagerConfig,
}

impl<KV: KeyValueStore> UlnManagerService<KV, NoopEventSink> {
    /// Create a service that discards events.
    pub fn new(store: KV, config: UlnManagerConfig) -> Self {
        Self::with_event_sink(store, NoopEventSink, config)
    }
}

impl<KV, ES> UlnManagerService<KV, ES>
where
    KV: KeyValueStore,
    ES: EventSink,
{
    /// Create a service publishing events to `events`.
    pub fn with_event_sink(store: KV, events: ES, config: UlnManagerConfig) -> Self {
        Self {
            store: Mutex::new(store),
            events,
            config,
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &UlnManagerConfig {
        &self.config
    }

    /// Read the store under the lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&KV) -> R) -> R {
        f(&self.store.lock())
    }

    /// Consume the service, returning the store.
    pub fn into_store(self) -> KV {
        self.store.into_inner()
    }

    fn deploy(
        store: &mut KV,
        caller: &CallerIdentity,
        key: PathKey,
        config: &UlnManagerConfig,
    ) -> Result<Path, UlnError> {
        let grant = authorize(&key.src_oapp, caller)?;
        key.validate(config)?;
        let staged = PathRegistry::new(&*store).stage_create(&grant, key)?;
        store.atomic_batch_write(staged.writes)?;
        Ok(staged.record)
    }

    fn configure(
        store: &mut KV,
        caller: &CallerIdentity,
        key: &PathKey,
        direction: Direction,
        payload: Vec<u8>,
        config: &UlnManagerConfig,
    ) -> Result<PathConfig, UlnError> {
        let grant = authorize(key.owner(direction), caller)?;
        let staged = ConfigStore::new(&*store, config.max_config_payload_bytes)
            .stage_update(&grant, key, direction, payload)?;
        store.atomic_batch_write(staged.writes)?;
        Ok(staged.record)
    }

    fn set_config(
        &self,
        caller: &CallerIdentity,
        key: &PathKey,
        direction: Direction,
        payload: Vec<u8>,
    ) -> Result<u64, UlnError> {
        // Lock released before publishing so sinks may read the service.
        let outcome = {
            let mut store = self.store.lock();
            Self::configure(&mut store, caller, key, direction, payload, &self.config)
        };
        match outcome {
            Ok(config) => {
                info!(
                    "[uln] {} config of {} set to version {} by {}",
                    direction,
                    key,
                    config.version,
                    caller.account().short()
                );
                self.events
                    .publish(UlnEvent::config_updated(*key, direction, config.version));
                Ok(config.version)
            }
            Err(err) => Err(self.reject(direction.into(), key, caller, err)),
        }
    }

    /// Log and publish a rejection, handing the error back unchanged.
    fn reject(
        &self,
        operation: MutationKind,
        key: &PathKey,
        caller: &CallerIdentity,
        err: UlnError,
    ) -> UlnError {
        warn!(
            "[uln] {:?} on {} by {} rejected: {}",
            operation,
            key,
            caller.account().short(),
            err
        );
        self.events.publish(UlnEvent::OperationRejected {
            operation,
            key: *key,
            caller: *caller.account(),
            kind: err.kind(),
        });
        err
    }
}

impl<KV, ES> UlnManagerApi for UlnManagerService<KV, ES>
where
    KV: KeyValueStore,
    ES: EventSink,
{
    fn deploy_connection(
        &self,
        caller: &CallerIdentity,
        key: PathKey,
    ) -> Result<PathId, UlnError> {
        let outcome = {
            let mut store = self.store.lock();
            Self::deploy(&mut store, caller, key, &self.config)
        };
        match outcome {
            Ok(path) => {
                info!("[uln] path {} deployed as {}", key, path.id());
                self.events.publish(UlnEvent::PathDeployed {
                    path_id: path.id(),
                    key,
                });
                Ok(path.id())
            }
            Err(err) => Err(self.reject(MutationKind::Deploy, &key, caller, err)),
        }
    }

    fn set_send_config(
        &self,
        caller: &CallerIdentity,
        key: &PathKey,
        payload: Vec<u8>,
    ) -> Result<u64, UlnError> {
        self.set_config(caller, key, Direction::Send, payload)
    }

    fn set_receive_config(
        &self,
        caller: &CallerIdentity,
        key: &PathKey,
        payload: Vec<u8>,
    ) -> Result<u64, UlnError> {
        self.set_config(caller, key, Direction::Receive, payload)
    }

    fn lookup_path(&self, key: &PathKey) -> Result<Path, UlnError> {
        let store = self.store.lock();
        PathRegistry::new(&*store).lookup_path(key)
    }

    fn get_config(&self, key: &PathKey, direction: Direction) -> Result<PathConfig, UlnError> {
        let store = self.store.lock();
        if !PathRegistry::new(&*store).contains(key)? {
            return Err(UlnError::NotFound(*key));
        }
        ConfigStore::new(&*store, self.config.max_config_payload_bytes).get(key, direction)
    }

    fn connection_status(&self, key: &PathKey) -> Result<ConnectionStatus, UlnError> {
        let store = self.store.lock();
        if !PathRegistry::new(&*store).contains(key)? {
            return Ok(ConnectionStatus::undeployed());
        }

        let configs = ConfigStore::new(&*store, self.config.max_config_payload_bytes);
        let status = ConnectionStatus {
            state: ConnectionState::Deployed,
            send_version: configs.find(key, Direction::Send)?.map(|c| c.version),
            receive_version: configs.find(key, Direction::Receive)?.map(|c| c.version),
        };
        debug!("[uln] status of {}: {:?}", key, status);
        Ok(status)
    }

    fn paths_from(&self, src_eid: Eid, src_oapp: &AccountId) -> Result<Vec<Path>, UlnError> {
        let store = self.store.lock();
        PathRegistry::new(&*store).paths_from(src_eid, src_oapp)
    }
}
