//! # Shared Types Crate
//!
//! Identity and envelope types used across the ULN Manager workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `AccountId` and `Eid` are defined once here.
//! - **Envelope Authority**: The `OperationEnvelope<T>` origin is the sole
//!   source of caller identity for an inbound operation.
//! - **No Redundant Identity**: Payloads MUST NOT contain requester fields.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::OperationEnvelope;
pub use errors::*;
