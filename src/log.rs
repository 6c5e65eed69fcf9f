// src/log.rs
//
// Debug log for sync runs. Events go through `tracing`; `init` routes them to
// a plain-text file so the CLI's stdout stays clean JSON.
// Without `init` (library use, tests) the macros below are no-ops.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

#[doc(hidden)]
pub use tracing as __tracing;

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Install the file logger. `RUST_LOG` wins over `filter` when set.
pub fn init(log_file: &Path, filter: &str) -> Result<(), LogInitError> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| LogInitError::Open {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|source| LogInitError::Open {
            path: log_file.display().to_string(),
            source,
        })?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => EnvFilter::try_new(filter).map_err(|source| LogInitError::Filter {
            filter: s!(filter),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LogInitError::AlreadyInstalled)
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
