//! # ULN Node Library
//!
//! Exposes the configuration and replay loop of the `uln-node` binary for
//! testing. The main entry point is `main.rs`.

#![warn(missing_docs)]

pub mod config;
pub mod replay;

pub use config::{ConfigError, NodeConfig, StorageConfig};
pub use replay::{InputLine, OutputLine, ReplaySummary, Replayer};
