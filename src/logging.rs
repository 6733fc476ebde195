use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// `research_assistant_{YYYYmmdd_HHMMSS}.log` inside `dir`.
pub fn log_file_path(dir: &Path, now: chrono::DateTime<chrono::Local>) -> PathBuf {
    dir.join(format!(
        "research_assistant_{}.log",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Open the session log file for `now` in append mode, creating `dir` as needed.
/// Processes started within the same second share the file.
pub fn open_log_file(dir: &Path, now: chrono::DateTime<chrono::Local>) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = log_file_path(dir, now);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    Ok((path, file))
}

/// Install the global subscriber: DEBUG and above to the session log file in
/// `dir`, INFO and above to stderr. Returns the log file path.
pub fn init(dir: &Path) -> Result<PathBuf> {
    let (path, file) = open_log_file(dir, chrono::Local::now())?;

    // Bridge log records from dependencies (reqwest, hyper) into tracing
    tracing_log::LogTracer::init()?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::INFO);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("new research assistant session started - log file: {}", path.display());
    Ok(path)
}
