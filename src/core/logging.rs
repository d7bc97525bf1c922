//! File logging for the TUI.
//!
//! ratatui owns the terminal, so nothing is written to stdout. Events go to a
//! daily-rolling JSON log under the data directory; `log` macros are bridged
//! into `tracing` by the subscriber. Rotated logs from earlier days are
//! gzipped in the background.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "rapidshorts.log";

/// Initialize file-only logging.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered lines are flushed on shutdown.
pub fn init(log_dir: &Path) -> WorkerGuard {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Cannot create log directory {}: {e}", log_dir.display());
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // try_init also installs the `log` → `tracing` bridge
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Logging already initialized: {}", e);
    }

    let archive_dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(&archive_dir));

    log::info!(
        "Logging to {} (daily rotation)",
        log_dir.join(LOG_FILE_PREFIX).display()
    );

    guard
}

/// Gzip rotated logs that are not today's.
pub fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for path in entries.flatten().map(|e| e.path()) {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_PREFIX}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// `<name>` becomes `<name>.gz`; an existing archive is left alone.
fn compress_file(path: &Path) -> io::Result<()> {
    let mut archive = path.as_os_str().to_owned();
    archive.push(".gz");
    let archive = PathBuf::from(archive);
    if archive.exists() {
        return Ok(());
    }

    let mut source = fs::File::open(path)?;
    let mut encoder = GzEncoder::new(fs::File::create(&archive)?, Compression::default());
    io::copy(&mut source, &mut encoder)?;
    encoder.finish()?.sync_all()?;
    fs::remove_file(path)
}
