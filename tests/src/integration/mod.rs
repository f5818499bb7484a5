//! # Integration Flows
//!
//! End-to-end operation sequences through the wire handler.

pub mod flows;
