//! Log setup. The terminal belongs to the TUI, so logs go to a file.

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default log file location (<data dir>/jswp/jswp.log)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("jswp").join("jswp.log"))
}

/// Builds the level filter from `RUST_LOG`-style directives.
///
/// `directives` wins when it holds any; otherwise `warn`, or `debug` when `verbose`.
pub fn build_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Installs the global subscriber writing to `path`.
///
/// `RUST_LOG` takes precedence over the `verbose` default.
pub fn init(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(directives.as_deref(), verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}
