//! # Error Types
//!
//! Errors raised while parsing identities or validating envelopes.

use thiserror::Error;

/// Errors from parsing a textual account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityParseError {
    /// No hex digits after the optional `0x`.
    #[error("Empty account id")]
    Empty,

    /// More than 64 hex digits.
    #[error("Account id too long: {digits} hex digits, max 64")]
    TooLong { digits: usize },

    /// Not valid hex.
    #[error("Invalid hex in account id: {0}")]
    InvalidHex(String),
}

/// Errors related to envelope validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Envelope version not supported.
    #[error("Unsupported version: received {received}, supported {supported}")]
    UnsupportedVersion { received: u16, supported: u16 },
}
