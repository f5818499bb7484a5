//! Shared builders for the suite.

use rand::Rng;
use shared_types::{AccountId, Eid, OperationEnvelope};
use std::sync::Arc;
use uln_manager::{
    InMemoryKVStore, Operation, PathKey, RawOperation, RecordingEventSink, UlnManagerConfig,
    UlnManagerHandler, UlnManagerService,
};

/// Service over an in-memory store, recording events.
pub type TestService = UlnManagerService<InMemoryKVStore, Arc<RecordingEventSink>>;

/// Handler over `TestService`.
pub type TestHandler = UlnManagerHandler<TestService>;

/// Endpoint ids used throughout the suite.
pub const ETHEREUM: Eid = Eid(30101);
/// Destination endpoint.
pub const ARBITRUM: Eid = Eid(30110);

/// A fresh handler and the sink its service publishes to.
pub fn handler() -> (TestHandler, Arc<RecordingEventSink>) {
    let config = UlnManagerConfig::default();
    let sink = Arc::new(RecordingEventSink::new());
    let service =
        UlnManagerService::with_event_sink(InMemoryKVStore::new(), Arc::clone(&sink), config.clone());
    (UlnManagerHandler::new(service, config), sink)
}

/// A random non-zero account.
pub fn random_account() -> AccountId {
    let mut bytes: [u8; 32] = rand::thread_rng().gen();
    bytes[0] |= 1;
    AccountId::new(bytes)
}

/// Path from `src` on Ethereum to `dst` on Arbitrum.
pub fn path(src: AccountId, dst: AccountId) -> PathKey {
    PathKey::new(ETHEREUM, src, ARBITRUM, dst)
}

/// Envelope carrying `op` from `origin`.
pub fn signed(origin: AccountId, op: &Operation) -> RawOperation {
    OperationEnvelope::new(origin, op.encode())
}

/// Snapshot of the service's store.
pub fn snapshot(handler: &TestHandler) -> InMemoryKVStore {
    handler.service().with_store(|kv| kv.clone())
}
