// src/log.rs
//
// tracing subscriber setup. Events carry an uptime stamp like
// `0.412337s` and go either to stderr or, appended, to the configured log
// file behind a mutex.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::Uptime;

use crate::config::LogConfig;

fn open_log_file(cfg: &LogConfig) -> io::Result<Option<File>> {
    let Some(path) = cfg.file.as_ref() else { return Ok(None) };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Some(file))
}

fn filter(cfg: &LogConfig) -> EnvFilter {
    // RUST_LOG wins over the configured level when set.
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it again is a no-op; an unusable log
/// file falls back to stderr rather than failing startup.
pub fn init(cfg: &LogConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(cfg))
        .with_timer(Uptime::default())
        .with_target(false);

    match open_log_file(cfg) {
        Ok(Some(file)) => {
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        Ok(None) => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
        Err(e) => {
            let _ = builder.with_writer(io::stderr).try_init();
            tracing::warn!(error = %e, file = ?cfg.file, "could not open log file; logging to stderr");
        }
    }
}
