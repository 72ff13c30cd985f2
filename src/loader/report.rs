//! Outcome of a single load operation.

use std::path::{
    Path,
    PathBuf,
};

use crate::error::LoadError;

/// Counters collected while merging a source into a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows that produced or updated a record.
    pub data_rows: usize,
    /// Lines or rows dropped for lacking the fixed columns.
    pub skipped_rows: usize,
    pub records_created: usize,
    /// Rows whose key already had a record.
    pub records_merged: usize,
    /// Translation values inserted or overwritten.
    pub translations_stored: usize,
    /// Non-blank language codes read from the header, in column order.
    pub languages: Vec<String>,
}

/// What a load did.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadStats),
    /// The source file doesn't exist. The map is untouched.
    NotFound,
    /// The source couldn't be read, even from a temporary copy when retrying
    /// was allowed. The map is untouched.
    Failed(LoadError),
}

/// Result of a load operation, returned instead of an error so callers can
/// decide whether a missing or unreadable table matters to them.
#[derive(Debug)]
pub struct LoadReport {
    /// File the records came from; `None` for in-memory sources.
    pub source: Option<PathBuf>,
    /// Whether the file was read through a temporary copy.
    pub retried: bool,
    pub outcome: LoadOutcome,
}

impl LoadReport {
    pub(crate) fn loaded(source: Option<&Path>, retried: bool, stats: LoadStats) -> Self {
        Self { source: source.map(Path::to_path_buf), retried, outcome: LoadOutcome::Loaded(stats) }
    }

    pub(crate) fn not_found(source: &Path) -> Self {
        Self { source: Some(source.to_path_buf()), retried: false, outcome: LoadOutcome::NotFound }
    }

    pub(crate) fn failed(source: &Path, retried: bool, error: LoadError) -> Self {
        Self {
            source: Some(source.to_path_buf()),
            retried,
            outcome: LoadOutcome::Failed(error),
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Loaded(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.outcome, LoadOutcome::NotFound)
    }

    #[must_use]
    pub const fn stats(&self) -> Option<&LoadStats> {
        match &self.outcome {
            LoadOutcome::Loaded(stats) => Some(stats),
            LoadOutcome::NotFound | LoadOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&LoadError> {
        match &self.outcome {
            LoadOutcome::Failed(error) => Some(error),
            LoadOutcome::Loaded(_) | LoadOutcome::NotFound => None,
        }
    }
}
