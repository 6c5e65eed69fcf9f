// src/progress.rs
use std::fmt;

/// Steps of one sync, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    FetchingExisting,
    Merging,
    Persisting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Extracting => "Extracting profile data",
            Stage::FetchingExisting => "Fetching existing record",
            Stage::Merging => "Merging",
            Stage::Persisting => "Saving record",
        })
    }
}

/// Status reporting for a sync. Frontends (CLI) implement this to surface
/// progress to users.
pub trait Progress {
    /// Called when a stage starts.
    fn stage(&mut self, _stage: Stage) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self, _ok: bool) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Records everything it is told; handy in tests.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub stages: Vec<Stage>,
    pub lines: Vec<String>,
    pub finished: Option<bool>,
}

impl Progress for RecordingProgress {
    fn stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }

    fn finish(&mut self, ok: bool) {
        self.finished = Some(ok);
    }
}
