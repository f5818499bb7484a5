//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits: storage, locking, events, record codec.

mod codec;
mod events;
mod lock;
mod storage;

pub use codec::RecordCodec;
pub use events::{NoopEventSink, RecordingEventSink};
pub use lock::{DataDirLock, LockError};
pub use storage::{FileBackedKVStore, InMemoryKVStore};
