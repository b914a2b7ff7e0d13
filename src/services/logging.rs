//! Tracing subscriber setup
//!
//! The terminal owns stdout while the browser runs, so log output goes
//! to a file. Shared between the main binary and tests.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber with file logging.
///
/// Environment-based filtering (RUST_LOG) applies on top of an INFO
/// default.
pub fn init_global(log_file_path: &Path) -> Result<()> {
    if let Some(parent) = log_file_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let log_file = File::create(log_file_path)
        .with_context(|| format!("creating log file {}", log_file_path.display()))?;

    build_subscriber(log_file).init();
    Ok(())
}

/// Build a subscriber that writes to the given file.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
}

/// Default log path when neither the config nor the CLI names one.
///
/// Prefers the platform state directory, then the cache directory, and
/// falls back to the system temp directory.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("tdrive")
        .join("tdrive.log")
}
