//! # Storage Adapters
//!
//! `KeyValueStore` implementations.
//!
//! - `InMemoryKVStore`: ordered map for tests and embedding.
//! - `FileBackedKVStore`: the whole map persisted to one file, rewritten
//!   through a temp file and rename on every committed batch.

use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// In-memory key-value store.
///
/// Ordered so prefix scans return keys in order and two stores can be
/// compared byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn apply_batch(data: &mut BTreeMap<Vec<u8>, Vec<u8>>, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
        }
    }
}

fn scan(data: &BTreeMap<Vec<u8>, Vec<u8>>, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
    data.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Single-threaded map: applying in order cannot fail halfway.
        apply_batch(&mut self.data, operations);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}

/// File header identifying the format.
const FILE_MAGIC: &[u8; 6] = b"ULNKV1";

/// Length of the SHA-256 trailer.
const CHECKSUM_LEN: usize = 32;

/// File-backed key-value store.
///
/// Layout: `MAGIC ‖ ([key_len:u32 LE][key][value_len:u32 LE][value])* ‖ sha256(body)`.
/// A file that fails the checksum or framing is reported as corruption, never
/// silently treated as empty.
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = Self::decode_file(&bytes)?;
                info!(
                    "[uln] loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("[uln] no existing store at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(KVStoreError::Io {
                    message: e.to_string(),
                })
            }
        };

        Ok(Self { data, path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode_file(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let corrupt = |message: &str| KVStoreError::Corruption {
            message: message.to_string(),
        };

        if bytes.len() < FILE_MAGIC.len() + CHECKSUM_LEN || &bytes[..FILE_MAGIC.len()] != FILE_MAGIC
        {
            return Err(corrupt("missing header"));
        }

        let rest = &bytes[FILE_MAGIC.len()..];
        let (body, checksum) = rest.split_at(rest.len() - CHECKSUM_LEN);
        if Sha256::digest(body).as_slice() != checksum {
            return Err(corrupt("checksum mismatch"));
        }

        let mut data = BTreeMap::new();
        let mut cursor = 0;
        while cursor < body.len() {
            let key = read_frame(body, &mut cursor).ok_or_else(|| corrupt("truncated key"))?;
            let value = read_frame(body, &mut cursor).ok_or_else(|| corrupt("truncated value"))?;
            data.insert(key, value);
        }
        Ok(data)
    }

    fn encode_file(data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Vec<u8> {
        let mut body = Vec::new();
        for (key, value) in data {
            body.extend_from_slice(&(key.len() as u32).to_le_bytes());
            body.extend_from_slice(key);
            body.extend_from_slice(&(value.len() as u32).to_le_bytes());
            body.extend_from_slice(value);
        }

        let mut out = Vec::with_capacity(FILE_MAGIC.len() + body.len() + CHECKSUM_LEN);
        out.extend_from_slice(FILE_MAGIC);
        out.extend_from_slice(&body);
        out.extend_from_slice(&Sha256::digest(&body));
        out
    }

    fn save(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        use std::io::Write;

        let io = |e: std::io::Error| KVStoreError::Io {
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io)?;
            }
        }

        let bytes = Self::encode_file(data);
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io)?;
        file.write_all(&bytes).map_err(io)?;
        file.sync_all().map_err(io)?;
        std::fs::rename(&temp_path, &self.path).map_err(io)?;

        debug!("[uln] persisted {} keys to {}", data.len(), self.path.display());
        Ok(())
    }
}

fn read_frame(body: &[u8], cursor: &mut usize) -> Option<Vec<u8>> {
    let len_end = cursor.checked_add(4)?;
    let len = u32::from_le_bytes(body.get(*cursor..len_end)?.try_into().ok()?) as usize;
    let end = len_end.checked_add(len)?;
    let frame = body.get(len_end..end)?.to_vec();
    *cursor = end;
    Some(frame)
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Stage on a copy; memory only changes once the file is durable.
        let mut staged = self.data.clone();
        apply_batch(&mut staged, operations);
        self.save(&staged)?;
        self.data = staged;
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}
