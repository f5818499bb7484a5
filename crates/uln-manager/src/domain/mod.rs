//! # Domain Module
//!
//! Core domain types for the ULN Manager.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod keys;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use keys::KeyPrefix;
pub use value_objects::*;
