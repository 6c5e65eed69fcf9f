// src/sync.rs
//! One sync: extract → fetch existing → merge → persist, strictly in order.
use serde::{Deserialize, Serialize};

use crate::core::html::Document;
use crate::merge::merge;
use crate::profile::ProfileRecord;
use crate::progress::{NullProgress, Progress, Stage};
use crate::scrape::{Diagnostic, Extractor};
use crate::store::{ProfileStore, StoreError};

/// What to do when the stored record cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Merge against an empty record. Stored lists and contact details are
    /// then lost on persist.
    #[default]
    TreatAsEmpty,
    /// Stop before merging; nothing is written.
    Abort,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExistingSource {
    Stored,
    NotFound,
    FetchFailed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    pub record: ProfileRecord,
    pub existing: ExistingSource,
    pub diagnostics: Vec<Diagnostic>,
    /// Minimum fields the merged record still lacks (name, title).
    pub missing_required: Vec<&'static str>,
    pub persisted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("fetching existing record: {0}")]
    Fetch(#[source] StoreError),
    #[error("saving merged record: {0}")]
    Persist(#[source] StoreError),
}

pub struct SyncCoordinator<S: ProfileStore> {
    extractor: Extractor,
    store: S,
    policy: FetchFailurePolicy,
}

impl<S: ProfileStore> SyncCoordinator<S> {
    pub fn new(extractor: Extractor, store: S, policy: FetchFailurePolicy) -> Self {
        Self { extractor, store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sync(&self, doc: &Document, progress: Option<&mut dyn Progress>) -> Result<SyncOutcome, SyncError> {
        match progress {
            Some(p) => self.run(doc, true, p),
            None => self.run(doc, true, &mut NullProgress),
        }
    }

    pub fn sync_html(&self, html: &str, progress: Option<&mut dyn Progress>) -> Result<SyncOutcome, SyncError> {
        self.sync(&Document::parse(html), progress)
    }

    /// Same as `sync` without the persist step.
    pub fn preview(&self, doc: &Document, progress: Option<&mut dyn Progress>) -> Result<SyncOutcome, SyncError> {
        match progress {
            Some(p) => self.run(doc, false, p),
            None => self.run(doc, false, &mut NullProgress),
        }
    }

    fn run(&self, doc: &Document, persist: bool, progress: &mut dyn Progress) -> Result<SyncOutcome, SyncError> {
        let result = self.steps(doc, persist, progress);
        progress.finish(result.is_ok());
        result
    }

    fn steps(&self, doc: &Document, persist: bool, progress: &mut dyn Progress) -> Result<SyncOutcome, SyncError> {
        progress.stage(Stage::Extracting);
        let extraction = self.extractor.extract_report(doc);
        let snap = &extraction.snapshot;
        progress.log(&format!(
            "Found {} experience, {} education, {} certification entries",
            snap.experience.len(),
            snap.education.len(),
            snap.certifications.len()
        ));

        progress.stage(Stage::FetchingExisting);
        let (existing, source) = match self.store.fetch_existing() {
            Ok(Some(rec)) => (Some(rec), ExistingSource::Stored),
            Ok(None) => {
                progress.log("No existing record, creating a new one");
                (None, ExistingSource::NotFound)
            }
            Err(e) => match self.policy {
                FetchFailurePolicy::Abort => {
                    loge!("fetch existing failed, aborting: {e}");
                    return Err(SyncError::Fetch(e));
                }
                FetchFailurePolicy::TreatAsEmpty => {
                    logw!("fetch existing failed, merging against an empty record: {e}");
                    progress.log("Could not read existing record; starting from an empty one");
                    (None, ExistingSource::FetchFailed(e.to_string()))
                }
            },
        };

        progress.stage(Stage::Merging);
        let record = merge(snap, existing.as_ref());
        let missing_required = record.missing_required();
        if !missing_required.is_empty() {
            logw!("merged record lacks {}", missing_required.join(", "));
        }

        if persist {
            progress.stage(Stage::Persisting);
            if let Err(e) = self.store.persist(&record) {
                loge!("persist failed: {e}");
                return Err(SyncError::Persist(e));
            }
        }

        Ok(SyncOutcome {
            record,
            existing: source,
            diagnostics: extraction.diagnostics,
            missing_required,
            persisted: persist,
        })
    }
}
