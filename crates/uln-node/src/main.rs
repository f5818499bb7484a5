//! # ULN Node
//!
//! Operator entry point for the ULN Manager.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment and validate it
//! 3. Lock the data directory and open the store
//! 4. Replay operations from `ULN_OPERATIONS` or stdin to stdout
//! 5. Exit non-zero if any operation failed fatally

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use uln_manager::{DataDirLock, FileBackedKVStore, UlnManagerHandler, UlnManagerService};
use uln_node::{NodeConfig, Replayer};

fn main() -> Result<()> {
    // Initialize logging; stdout carries results, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let config = NodeConfig::from_env();
    config.validate().context("invalid configuration")?;

    info!("===========================================");
    info!("  ULN Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let _lock = DataDirLock::acquire(&config.storage.data_dir)?;
    let store = FileBackedKVStore::open(config.store_path())
        .with_context(|| format!("opening store {}", config.store_path().display()))?;
    info!("[uln] store opened at {}", config.store_path().display());

    let service = UlnManagerService::new(store, config.manager.clone());
    let handler = UlnManagerHandler::new(service, config.manager.clone());
    let replayer = Replayer::new(&handler);

    let stdout = io::stdout().lock();
    let summary = match &config.operations {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening operations file {}", path.display()))?;
            replayer.replay(BufReader::new(file), stdout)?
        }
        None => replayer.replay(io::stdin().lock(), stdout)?,
    };

    if summary.has_fatal() {
        warn!("[uln] {} operation(s) failed fatally", summary.fatal);
        bail!("{} fatal operation(s)", summary.fatal);
    }
    Ok(())
}
