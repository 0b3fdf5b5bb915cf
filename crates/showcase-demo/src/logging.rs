#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! The terminal is owned by the UI, so log output only goes to a file.
//! Without `--log-file` no subscriber is installed and every event is
//! discarded.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `SHOWCASE_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Build the event filter from `SHOWCASE_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("SHOWCASE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global fmt subscriber appending to `path`.
///
/// Returns `Ok(false)` when `path` is `None` or a subscriber was already
/// installed.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(path: Option<&Path>) -> io::Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let file = open_log(path)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(path = %path.display(), "logging initialized");
    }
    Ok(installed)
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
