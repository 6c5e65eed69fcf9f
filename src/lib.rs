// src/lib.rs
//! Profile page → portfolio record sync.
//!
//! ```text
//! html ─ core::html::Document::parse ─▶ scrape::Extractor (specs + engine) ─▶ ProfileSnapshot
//!      ─ merge::merge(snapshot, stored) ─▶ ProfileRecord ─ store::ProfileStore::persist
//! ```
//! `sync::SyncCoordinator` runs those steps in order.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod dates;
pub mod engine;
pub mod merge;
pub mod profile;
pub mod progress;
pub mod scrape;
pub mod specs;
pub mod store;
pub mod sync;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::core::html::Document;
pub use merge::merge;
pub use profile::{ProfileRecord, ProfileSnapshot};
pub use scrape::{Extraction, Extractor};
pub use store::{JsonFileStore, ProfileStore};
pub use sync::{FetchFailurePolicy, SyncCoordinator, SyncError, SyncOutcome};
