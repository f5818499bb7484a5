//! # IPC Module
//!
//! Wire boundary of the ULN Manager.
//!
//! ## Security Model
//!
//! - Every operation arrives in an `OperationEnvelope<Vec<u8>>`
//! - The envelope origin is the SOLE source of the caller identity
//! - Payloads are decoded into typed operations before reaching the guard
//!
//! ## Modules
//!
//! - `handler`: `UlnManagerHandler` dispatching envelopes to the service
//! - `payloads`: opcodes, `Operation` and the big-endian decoder

pub mod handler;
pub mod payloads;

pub use handler::{OperationResult, RawOperation, UlnManagerHandler};
pub use payloads::{opcodes, Operation};
