// src/scrape/ids.rs
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::profile::EntryId;

/// Supplies ids for newly extracted entries. Ids from one source are unique.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> EntryId;
}

/// Monotonic counter. Seeded from the wall clock in production so ids from
/// separate runs rarely collide; seeded explicitly in tests.
#[derive(Debug)]
pub struct SequenceIds {
    next: AtomicI64,
}

impl SequenceIds {
    pub fn starting_at(first: EntryId) -> Self {
        Self { next: AtomicI64::new(first) }
    }

    /// Milliseconds since the Unix epoch.
    pub fn from_clock() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as EntryId)
            .unwrap_or(0);
        Self::starting_at(now)
    }
}

impl IdSource for SequenceIds {
    fn next_id(&self) -> EntryId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
