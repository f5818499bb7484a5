//! # Path Registry
//!
//! The mapping from path keys to path records. Reads go straight to the
//! store; creation is staged as a batch that the caller commits, so a
//! rejected operation never writes.
//!
//! Ownership is not checked here beyond the grant binding: the guard runs
//! before `stage_create` is reachable.

use crate::adapters::RecordCodec;
use crate::domain::{invariant_grant_covers, Grant, KeyPrefix, Path, PathKey, UlnError};
use crate::ports::{BatchOperation, KeyValueStore};
use shared_types::{AccountId, Eid};

/// A record plus the writes that persist it.
#[derive(Debug)]
pub struct Staged<T> {
    /// The record as it will be after commit.
    pub record: T,
    /// Writes to commit atomically.
    pub writes: Vec<BatchOperation>,
}

/// Path registry over a key-value store.
pub struct PathRegistry<'a, KV: KeyValueStore + ?Sized> {
    kv: &'a KV,
    codec: RecordCodec,
}

impl<'a, KV: KeyValueStore + ?Sized> PathRegistry<'a, KV> {
    /// Registry reading from `kv`.
    pub fn new(kv: &'a KV) -> Self {
        Self {
            kv,
            codec: RecordCodec,
        }
    }

    /// Stage creation of a path record.
    ///
    /// Rejects an existing 4-tuple with `PathAlreadyExists`; re-deploying
    /// never updates the existing record.
    pub fn stage_create(&self, grant: &Grant, key: PathKey) -> Result<Staged<Path>, UlnError> {
        invariant_grant_covers(grant, &key.src_oapp)?;

        let storage_key = KeyPrefix::path_key(&key);
        if self.kv.exists(&storage_key)? {
            return Err(UlnError::PathAlreadyExists(key));
        }

        let path = Path::new(key);
        let value = self.codec.encode(&path)?;
        Ok(Staged {
            record: path,
            writes: vec![BatchOperation::put(storage_key, value)],
        })
    }

    /// Look up a path record.
    pub fn lookup_path(&self, key: &PathKey) -> Result<Path, UlnError> {
        self.find_path(key)?.ok_or(UlnError::NotFound(*key))
    }

    /// Look up a path record, `None` if absent.
    pub fn find_path(&self, key: &PathKey) -> Result<Option<Path>, UlnError> {
        match self.kv.get(&KeyPrefix::path_key(key))? {
            Some(bytes) => {
                let path: Path = self.codec.decode(&bytes)?;
                if path.key() != key {
                    return Err(UlnError::CorruptRecord(format!(
                        "record under {key} names {}",
                        path.key()
                    )));
                }
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    /// Whether a record exists for the 4-tuple.
    pub fn contains(&self, key: &PathKey) -> Result<bool, UlnError> {
        Ok(self.kv.exists(&KeyPrefix::path_key(key))?)
    }

    /// Every path deployed by `src_oapp` on `src_eid`, in key order.
    pub fn paths_from(&self, src_eid: Eid, src_oapp: &AccountId) -> Result<Vec<Path>, UlnError> {
        self.kv
            .prefix_scan(&KeyPrefix::source_prefix(src_eid, src_oapp))?
            .into_iter()
            .map(|(storage_key, bytes)| {
                let path: Path = self.codec.decode(&bytes)?;
                if KeyPrefix::path_key(path.key()) != storage_key {
                    return Err(UlnError::CorruptRecord(format!(
                        "record listed under {src_eid}:{} names {}",
                        src_oapp.short(),
                        path.key()
                    )));
                }
                Ok(path)
            })
            .collect()
    }
}
