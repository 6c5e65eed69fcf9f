// src/store.rs
//! Where the stored profile record lives.
//!
//! `ProfileStore` is the seam the sync flow talks to. `JsonFileStore` keeps
//! the record in one pretty-printed JSON file, the same shape the portfolio
//! backend serves.
use std::{fs, io, path::{Path, PathBuf}};

use crate::profile::ProfileRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("reading {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("writing {path}: {source}")]
    Write { path: PathBuf, #[source] source: io::Error },
    #[error("{path} is not a profile record: {source}")]
    Parse { path: PathBuf, #[source] source: serde_json::Error },
    #[error("encoding profile record: {0}")]
    Encode(#[source] serde_json::Error),
    /// Failure reported by a non-file backend.
    #[error("{0}")]
    Backend(String),
}

pub trait ProfileStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn fetch_existing(&self) -> Result<Option<ProfileRecord>, StoreError>;

    fn persist(&self, record: &ProfileRecord) -> Result<(), StoreError>;
}

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileStore {
    fn fetch_existing(&self) -> Result<Option<ProfileRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                logd!("no stored record at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }

    fn persist(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let mut text = serde_json::to_string_pretty(record).map_err(StoreError::Encode)?;
        text.push('\n');

        let write_err = |source: io::Error| StoreError::Write { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.path, text).map_err(write_err)?;

        logf!("saved profile record to {}", self.path.display());
        Ok(())
    }
}
