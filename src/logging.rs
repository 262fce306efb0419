// src/logging.rs
// =============================================================================
// Diagnostics: two plain-text log files under the log directory.
//
// - info.log  : everything allowed by RUST_LOG (default "info")
// - error.log : errors only (page failures, timeouts, failed domains)
//
// The subscriber is installed for the current thread only and removed when
// the returned guard is dropped, so the entry point owns its lifetime.
// That covers every task because the binary runs on a current-thread
// runtime.
// =============================================================================

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer};

pub fn init(log_dir: &Path) -> Result<DefaultGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let info_log = open_log(&log_dir.join("info.log"))?;
    let error_log = open_log(&log_dir.join("error.log"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(info_log))
                .with_filter(filter),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(error_log))
                .with_filter(LevelFilter::ERROR),
        );

    let guard = tracing::subscriber::set_default(subscriber);
    tracing::debug!("Logging initialized");
    Ok(guard)
}

// Logs accumulate across runs
fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_go_to_both_files() {
        let dir = tempfile::tempdir().unwrap();

        {
            let _guard = init(dir.path()).unwrap();
            tracing::info!("processing http://a.test");
            tracing::error!("[ERROR][http://b.test] timeout");
        }

        let info = std::fs::read_to_string(dir.path().join("info.log")).unwrap();
        let errors = std::fs::read_to_string(dir.path().join("error.log")).unwrap();

        assert!(info.contains("processing http://a.test"));
        assert!(info.contains("timeout"));
        assert!(errors.contains("[ERROR][http://b.test] timeout"));
        assert!(!errors.contains("processing"));
    }

    #[test]
    fn test_creates_missing_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("logs");

        let _guard = init(&nested).unwrap();
        assert!(nested.join("info.log").exists());
        assert!(nested.join("error.log").exists());
    }
}
