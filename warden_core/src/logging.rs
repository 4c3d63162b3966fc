//! Logging utilities for warden-wide output to stdout and to the per-run
//! audit log file.
//!

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use time::OffsetDateTime;

// Re-exports for convenience
pub use tracing::metadata::LevelFilter;
pub use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{util::SubscriberInitExt, Layer};

/// Set up logging to stdout and, if `log_dir` is given, to a fresh
/// timestamped file inside it. Returns the path of the file.
pub fn setup(level: Option<LevelFilter>, log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    // The user can specify a log level via an env var
    // (such as for testing).
    let env = std::env::var("RUST_LOG").unwrap_or_else(|_| "warden=info".into());
    let mut logging_layers = vec![tracing_subscriber::EnvFilter::new(env).boxed()];

    // The input level overrides any env vars.
    let level = level.unwrap_or(LevelFilter::INFO);
    logging_layers.push(tracing_subscriber::fmt::layer().with_filter(level).boxed());

    let log_path = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let path = dir.join(log_file_name(OffsetDateTime::now_utc()));
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            logging_layers.push(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(level)
                    .boxed(),
            );
            Some(path)
        }
        None => None,
    };

    // Actually initialize all logging layers
    tracing_subscriber::registry().with(logging_layers).init();

    debug!("logging set up");
    Ok(log_path)
}

/// Name of the audit log for a run started at `started`.
pub fn log_file_name(started: OffsetDateTime) -> String {
    let t = started.to_offset(time::UtcOffset::UTC);
    format!(
        "warden_{:04}{:02}{:02}T{:02}{:02}{:02}Z.log",
        t.year(),
        u8::from(t.month()),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}
