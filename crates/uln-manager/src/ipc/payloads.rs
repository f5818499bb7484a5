//! IPC payload definitions and the big-endian wire decoder.
//!
//! Payloads follow envelope-only identity:
//! - NO requester or sender fields in any payload
//! - The caller is derived ONLY from the `OperationEnvelope` origin

use crate::domain::{DecodeError, Direction, PathKey, UlnManagerConfig};
use shared_types::{AccountId, Eid, ACCOUNT_ID_LEN};

/// Opcodes of the wire format.
pub mod opcodes {
    /// Deploy a connection path.
    pub const DEPLOY_CONNECTION: u32 = 1;
    /// Set the Send side configuration.
    pub const SET_SEND_CONFIG: u32 = 2;
    /// Set the Receive side configuration.
    pub const SET_RECEIVE_CONFIG: u32 = 3;
    /// Look up a path record.
    pub const LOOKUP_PATH: u32 = 4;
    /// Read one side's configuration.
    pub const GET_CONFIG: u32 = 5;
    /// Read the lifecycle state of a path.
    pub const CONNECTION_STATUS: u32 = 6;
}

/// A decoded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a path.
    DeployConnection(PathKey),
    /// Write the Send side configuration.
    SetSendConfig {
        /// Target path.
        key: PathKey,
        /// Opaque config bytes.
        payload: Vec<u8>,
    },
    /// Write the Receive side configuration.
    SetReceiveConfig {
        /// Target path.
        key: PathKey,
        /// Opaque config bytes.
        payload: Vec<u8>,
    },
    /// Read a path record.
    LookupPath(PathKey),
    /// Read one side's configuration.
    GetConfig {
        /// Target path.
        key: PathKey,
        /// Side to read.
        direction: Direction,
    },
    /// Read the lifecycle state.
    ConnectionStatus(PathKey),
}

impl Operation {
    /// Wire opcode.
    pub fn opcode(&self) -> u32 {
        match self {
            Operation::DeployConnection(_) => opcodes::DEPLOY_CONNECTION,
            Operation::SetSendConfig { .. } => opcodes::SET_SEND_CONFIG,
            Operation::SetReceiveConfig { .. } => opcodes::SET_RECEIVE_CONFIG,
            Operation::LookupPath(_) => opcodes::LOOKUP_PATH,
            Operation::GetConfig { .. } => opcodes::GET_CONFIG,
            Operation::ConnectionStatus(_) => opcodes::CONNECTION_STATUS,
        }
    }

    /// Path the operation targets.
    pub fn key(&self) -> &PathKey {
        match self {
            Operation::DeployConnection(key)
            | Operation::LookupPath(key)
            | Operation::ConnectionStatus(key)
            | Operation::SetSendConfig { key, .. }
            | Operation::SetReceiveConfig { key, .. }
            | Operation::GetConfig { key, .. } => key,
        }
    }

    /// Whether the operation mutates state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::DeployConnection(_)
                | Operation::SetSendConfig { .. }
                | Operation::SetReceiveConfig { .. }
        )
    }

    /// Encode to the wire format.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + PathKey::ENCODED_LEN + 4);
        out.extend_from_slice(&self.opcode().to_be_bytes());
        out.extend_from_slice(&self.key().encode());
        match self {
            Operation::SetSendConfig { payload, .. }
            | Operation::SetReceiveConfig { payload, .. } => {
                // Lengths above u32::MAX cannot be produced by decode.
                out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
                out.extend_from_slice(payload);
            }
            Operation::GetConfig { direction, .. } => out.push(direction.as_byte()),
            _ => {}
        }
        out
    }

    /// Decode an operation, rejecting anything that does not match the
    /// wire layout exactly.
    pub fn decode(bytes: &[u8], config: &UlnManagerConfig) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(bytes);
        let opcode = reader.u32()?;

        let op = match opcode {
            opcodes::DEPLOY_CONNECTION => Operation::DeployConnection(reader.path_key(config)?),
            opcodes::SET_SEND_CONFIG => {
                let key = reader.path_key(config)?;
                Operation::SetSendConfig {
                    key,
                    payload: reader.config_payload(config)?,
                }
            }
            opcodes::SET_RECEIVE_CONFIG => {
                let key = reader.path_key(config)?;
                Operation::SetReceiveConfig {
                    key,
                    payload: reader.config_payload(config)?,
                }
            }
            opcodes::LOOKUP_PATH => Operation::LookupPath(reader.path_key(config)?),
            opcodes::GET_CONFIG => {
                let key = reader.path_key(config)?;
                let byte = reader.u8()?;
                let direction =
                    Direction::from_byte(byte).ok_or(DecodeError::InvalidDirection(byte))?;
                Operation::GetConfig { key, direction }
            }
            opcodes::CONNECTION_STATUS => Operation::ConnectionStatus(reader.path_key(config)?),
            other => return Err(DecodeError::UnknownOpcode(other)),
        };

        match reader.remaining() {
            0 => Ok(op),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }
}

/// Cursor over a big-endian byte slice.
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        if self.bytes.len() < needed {
            return Err(DecodeError::Truncated {
                needed,
                remaining: self.bytes.len(),
            });
        }
        let (head, tail) = self.bytes.split_at(needed);
        self.bytes = tail;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn eid(&mut self, config: &UlnManagerConfig) -> Result<Eid, DecodeError> {
        let eid = Eid(self.u32()?);
        if config.reject_zero_eid && eid.0 == 0 {
            return Err(DecodeError::ZeroEid);
        }
        Ok(eid)
    }

    fn account(&mut self, config: &UlnManagerConfig) -> Result<AccountId, DecodeError> {
        let mut buf = [0u8; ACCOUNT_ID_LEN];
        buf.copy_from_slice(self.take(ACCOUNT_ID_LEN)?);
        let account = AccountId::new(buf);
        if config.reject_zero_account && account.is_zero() {
            return Err(DecodeError::ZeroAccount);
        }
        Ok(account)
    }

    fn path_key(&mut self, config: &UlnManagerConfig) -> Result<PathKey, DecodeError> {
        let src_eid = self.eid(config)?;
        let src_oapp = self.account(config)?;
        let dst_eid = self.eid(config)?;
        let dst_oapp = self.account(config)?;
        Ok(PathKey::new(src_eid, src_oapp, dst_eid, dst_oapp))
    }

    fn config_payload(&mut self, config: &UlnManagerConfig) -> Result<Vec<u8>, DecodeError> {
        let len = self.u32()? as usize;
        // Checked before reading so an oversized length never allocates.
        if len > config.max_config_payload_bytes {
            return Err(DecodeError::PayloadTooLarge {
                len,
                max: config.max_config_payload_bytes,
            });
        }
        Ok(self.take(len)?.to_vec())
    }
}
