//! # Configuration Store
//!
//! Per-path, per-direction verification configuration. A config can only be
//! staged for a path that exists, with a grant for the OApp owning that
//! direction.

use crate::adapters::RecordCodec;
use crate::domain::{
    invariant_grant_covers, invariant_payload_size, Direction, Grant, KeyPrefix, PathConfig,
    PathKey, UlnError,
};
use crate::ports::{BatchOperation, KeyValueStore};
use crate::registry::{PathRegistry, Staged};

/// Configuration store over a key-value store.
pub struct ConfigStore<'a, KV: KeyValueStore + ?Sized> {
    kv: &'a KV,
    codec: RecordCodec,
    max_payload_bytes: usize,
}

impl<'a, KV: KeyValueStore + ?Sized> ConfigStore<'a, KV> {
    /// Store reading from `kv`, accepting payloads up to `max_payload_bytes`.
    pub fn new(kv: &'a KV, max_payload_bytes: usize) -> Self {
        Self {
            kv,
            codec: RecordCodec,
            max_payload_bytes,
        }
    }

    /// Stage a create-or-update of one direction's config.
    ///
    /// The first update yields version 1; each later one increments it.
    pub fn stage_update(
        &self,
        grant: &Grant,
        key: &PathKey,
        direction: Direction,
        payload: Vec<u8>,
    ) -> Result<Staged<PathConfig>, UlnError> {
        invariant_grant_covers(grant, key.owner(direction))?;
        invariant_payload_size(payload.len(), self.max_payload_bytes)?;

        if !PathRegistry::new(self.kv).contains(key)? {
            return Err(UlnError::NotFound(*key));
        }

        let config = match self.find(key, direction)? {
            Some(current) => current
                .next(payload)
                .ok_or(UlnError::VersionExhausted {
                    key: *key,
                    direction,
                })?,
            None => PathConfig::initial(direction, payload),
        };

        let value = self.codec.encode(&config)?;
        Ok(Staged {
            record: config,
            writes: vec![BatchOperation::put(
                KeyPrefix::config_key(key, direction),
                value,
            )],
        })
    }

    /// Get one direction's config.
    pub fn get(&self, key: &PathKey, direction: Direction) -> Result<PathConfig, UlnError> {
        self.find(key, direction)?
            .ok_or(UlnError::ConfigNotFound {
                key: *key,
                direction,
            })
    }

    /// Get one direction's config, `None` if never set.
    pub fn find(&self, key: &PathKey, direction: Direction) -> Result<Option<PathConfig>, UlnError> {
        match self.kv.get(&KeyPrefix::config_key(key, direction))? {
            Some(bytes) => {
                let config: PathConfig = self.codec.decode(&bytes)?;
                if config.direction != direction {
                    return Err(UlnError::CorruptRecord(format!(
                        "{direction} slot of {key} holds a {} config",
                        config.direction
                    )));
                }
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }
}
