//! Diagnostic logging for apkfetch.
//!
//! Records go to `apkfetch.log` in the XDG state directory. When that file
//! cannot be opened they go to stderr instead, and [`init`] says which one
//! was picked so front ends can avoid echoing the same error twice.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,apkfetch=debug,apkfetch_core=debug";

/// Where log records end up after [`init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    pub fn is_stderr(&self) -> bool {
        matches!(self, LogTarget::Stderr)
    }
}

/// One handle per event. A log file whose descriptor cannot be duplicated
/// degrades to stderr for that event only.
enum EventWriter {
    Log(File),
    Stderr,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            EventWriter::Log(f) => f.write(buf),
            EventWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            EventWriter::Log(f) => f.flush(),
            EventWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => EventWriter::Log(f),
            Err(_) => EventWriter::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/apkfetch/apkfetch.log`, or the `$XDG_STATE_HOME` equivalent.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("apkfetch")?;
    Ok(xdg_dirs.get_state_home().join("apkfetch.log"))
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Sends apkfetch's records to the log file and returns its path.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "apkfetch log opened");
    Ok(path)
}

/// Sends apkfetch's records to stderr. A no-op if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Log to the file when possible, otherwise to stderr.
pub fn init() -> LogTarget {
    match init_logging() {
        Ok(path) => LogTarget::File(path),
        Err(err) => {
            init_logging_stderr();
            tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
            LogTarget::Stderr
        }
    }
}
