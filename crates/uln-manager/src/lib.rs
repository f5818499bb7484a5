//! # ULN Manager
//!
//! Owner-authorized path deployment and per-direction configuration for a
//! cross-chain messaging endpoint.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A path joins a source OApp on one endpoint to a destination OApp on
//! another. Anyone may deploy a path from their own OApp to any destination,
//! but each side of the path is configured only by the OApp that owns it:
//!
//! | Operation | Claimed owner |
//! |-----------|---------------|
//! | `deploy_connection` | `src_oapp` |
//! | `set_send_config` | `src_oapp` |
//! | `set_receive_config` | `dst_oapp` |
//!
//! The caller is always taken from the operation envelope, never from the
//! payload, and every mutation passes the authorization guard before any
//! write is staged.
//!
//! ## Module Structure
//!
//! ```text
//! uln-manager/
//! ├── domain/        # PathKey, Path, PathConfig, errors, guard
//! ├── ports/         # UlnManagerApi, KeyValueStore, ExecutionContext, EventSink
//! ├── adapters/      # stores, codec, data dir lock, event sinks
//! ├── identity.rs    # caller resolution from the envelope
//! ├── registry.rs    # path records
//! ├── config_store.rs
//! ├── service.rs     # lifecycle controller
//! └── ipc/           # wire decode and handler
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config_store;
pub mod domain;
pub mod events;
pub mod identity;
pub mod ipc;
pub mod ports;
pub mod registry;
pub mod service;

// Re-exports
pub use adapters::{
    DataDirLock, FileBackedKVStore, InMemoryKVStore, LockError, NoopEventSink, RecordCodec,
    RecordingEventSink,
};
pub use domain::{
    authorize, CallerIdentity, ConnectionState, ConnectionStatus, DecodeError, Direction,
    ErrorKind, Grant, KVStoreError, Path, PathConfig, PathId, PathKey, UlnError,
    UlnManagerConfig,
};
pub use events::{MutationKind, UlnEvent};
pub use identity::resolve_caller;
pub use ipc::{Operation, OperationResult, RawOperation, UlnManagerHandler};
pub use ports::{BatchOperation, EventSink, ExecutionContext, KeyValueStore, UlnManagerApi};
pub use service::UlnManagerService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
