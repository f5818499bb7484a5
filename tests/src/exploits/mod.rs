//! # Exploit Simulations
//!
//! Each module replays a concrete attack against the manager and asserts
//! that it is refused with zero state change.

pub mod identity_spoofing;
pub mod path_hijack;
