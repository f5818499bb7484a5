//! # Core Identity Entities
//!
//! Chain-level identifiers consumed by the connection manager.
//!
//! - `AccountId`: opaque 256-bit account identifier (an OApp or a wallet)
//! - `Eid`: 32-bit endpoint identifier of a chain
//! - `Hash`: 32-byte digest

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::IdentityParseError;

// Re-export U256 from primitive-types for numeric account construction
pub use primitive_types::U256;

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// Width of an account identifier in bytes.
pub const ACCOUNT_ID_LEN: usize = 32;

/// Opaque fixed-width (256-bit) account identifier.
///
/// Big-endian: `AccountId::from(U256::from(0xAAAAu64))` has `0xAA, 0xAA` in its
/// last two bytes, matching how chain tooling stores addresses as 256-bit uints.
///
/// Serializes as a `0x`-prefixed hex string for human-readable formats and as
/// raw bytes otherwise.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// The all-zero account. Never a valid OApp.
    pub const ZERO: AccountId = AccountId([0u8; ACCOUNT_ID_LEN]);

    /// Create from raw bytes.
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    /// Returns true for the all-zero account.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ACCOUNT_ID_LEN]
    }

    /// Numeric view of the identifier.
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Abbreviated form for log lines: `0xaaaa…bbbb`.
    pub fn short(&self) -> String {
        format!(
            "0x{}…{}",
            hex::encode(&self.0[..2]),
            hex::encode(&self.0[ACCOUNT_ID_LEN - 2..])
        )
    }
}

impl From<U256> for AccountId {
    fn from(value: U256) -> Self {
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.short())
    }
}

impl FromStr for AccountId {
    type Err = IdentityParseError;

    /// Parse a hex account, with or without `0x`. Short inputs are left-padded
    /// the way a 256-bit uint would be.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() {
            return Err(IdentityParseError::Empty);
        }
        if digits.len() > ACCOUNT_ID_LEN * 2 {
            return Err(IdentityParseError::TooLong {
                digits: digits.len(),
            });
        }

        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let decoded =
            hex::decode(&padded).map_err(|e| IdentityParseError::InvalidHex(e.to_string()))?;

        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes[ACCOUNT_ID_LEN - decoded.len()..].copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            struct HexVisitor;

            impl Visitor<'_> for HexVisitor {
                type Value = AccountId;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a hex-encoded 256-bit account id")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<AccountId, E> {
                    v.parse().map_err(E::custom)
                }
            }

            deserializer.deserialize_str(HexVisitor)
        } else {
            <[u8; ACCOUNT_ID_LEN]>::deserialize(deserializer).map(AccountId)
        }
    }
}

/// Endpoint identifier of a chain in the messaging protocol (e.g. 30101).
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Eid(pub u32);

impl Eid {
    /// Big-endian bytes, used in storage keys so keys sort by endpoint.
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for Eid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Eid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
