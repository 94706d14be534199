//! File logging
//!
//! The TUI owns the terminal, so logs go to a daily-rotated file at
//! `<data_local_dir>/leaf/logs/leaf.log`. Filter with `LEAF_LOG`
//! (e.g. `LEAF_LOG=leaf_core=debug`); default level is `info`.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_ENV: &str = "LEAF_LOG";

fn logs_dir() -> std::io::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no data directory"))?;
    let dir = base.join("leaf").join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let logs_dir = match logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            return None;
        }
    };

    let appender = tracing_appender::rolling::daily(logs_dir, "leaf.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    if tracing_subscriber::registry().with(file_layer).try_init().is_err() {
        return None;
    }
    Some(guard)
}
