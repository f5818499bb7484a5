//! Record codec using bincode.

use crate::domain::UlnError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes and decodes stored records.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordCodec;

impl RecordCodec {
    /// Serialize a record.
    pub fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, UlnError> {
        bincode::serialize(record).map_err(|e| UlnError::CorruptRecord(e.to_string()))
    }

    /// Deserialize a record.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, UlnError> {
        bincode::deserialize(bytes).map_err(|e| UlnError::CorruptRecord(e.to_string()))
    }
}
