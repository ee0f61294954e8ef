//! `tracing` subscriber setup for the binaries. Filtering follows `RUST_LOG`,
//! defaulting to `info`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Log to a file so the alternate screen is never written over. If the file
/// cannot be opened, logging is disabled rather than sent to the terminal and
/// the open error is returned for the caller to report.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    match open_log_file(path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter())
                .init();
            tracing::info!(path = %path.display(), "logging initialized");
            Ok(())
        }
        Err(err) => {
            tracing_subscriber::registry().with(env_filter()).init();
            Err(err)
        }
    }
}

/// Log to stderr, for headless runs.
pub fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color_code.log");
        open_log_file(&path).unwrap();
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("color_code.log");
        let err = open_log_file(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
