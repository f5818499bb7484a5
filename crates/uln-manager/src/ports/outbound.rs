//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the ULN Manager requires from its execution environment.

use crate::domain::KVStoreError;
use crate::events::UlnEvent;
use shared_types::{AccountId, OperationEnvelope};

/// Abstract interface for key-value database operations.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All entries whose key starts with `prefix`, in key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Batch operation for atomic writes.
///
/// Paths and configs are never deleted, so the only operation is a put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Storage key.
        key: Vec<u8>,
        /// Encoded record.
        value: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Source of the originating account of an operation (`getOriginAccount`).
pub trait ExecutionContext {
    /// The account that originated the operation, if the environment
    /// attributed one.
    fn origin_account(&self) -> Option<AccountId>;
}

impl<T> ExecutionContext for OperationEnvelope<T> {
    fn origin_account(&self) -> Option<AccountId> {
        self.origin
    }
}

/// Receiver of domain events.
pub trait EventSink: Send + Sync {
    /// Publish an event. Must not fail the operation that produced it.
    ///
    /// Called after the store lock is released, so a sink may query the
    /// service it is attached to.
    fn publish(&self, event: UlnEvent);
}
