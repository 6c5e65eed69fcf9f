// src/config/options.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::sync::FetchFailurePolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("parsing config {path}: {source}")]
    Parse { path: PathBuf, #[source] source: toml::de::Error },
}

/// Settings for one sync run. Every key is optional in the TOML file.
///
/// ```toml
/// store_path = "data/portfolio.json"
/// skills_category = "Technical Skills"
/// on_fetch_error = "treat_as_empty"   # or "abort"
/// log_file = ".store/debug.log"
/// log_filter = "profile_sync=debug"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncOptions {
    pub store_path: PathBuf,
    pub skills_category: String,
    pub on_fetch_error: FetchFailurePolicy,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            skills_category: s!(DEFAULT_SKILLS_CATEGORY),
            on_fetch_error: FetchFailurePolicy::default(),
            log_file: PathBuf::from(LOG_FILE),
            log_filter: s!(DEFAULT_LOG_FILTER),
        }
    }
}

impl SyncOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// An explicit path must exist. Without one, `CONFIG_FILE` in the working
    /// directory is used when present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let local = Path::new(CONFIG_FILE);
                if local.is_file() { Self::load(local) } else { Ok(Self::default()) }
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
