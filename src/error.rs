//! Errors raised while reading translation sources.

use std::path::PathBuf;

use thiserror::Error;

/// Why a translation source couldn't be read.
///
/// Load operations don't return this directly; it ends up in
/// [`crate::loader::LoadOutcome::Failed`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read spreadsheet '{}': {message}", .path.display())]
    Spreadsheet { path: PathBuf, message: String },

    #[error("Spreadsheet '{}' has no worksheet", .path.display())]
    NoWorksheet { path: PathBuf },

    /// The fallback copy of a file that couldn't be read in place failed.
    #[error("Failed to copy '{}' to a temporary file: {source}", .path.display())]
    TempCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported translation file format: '{}'", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    /// Path of the source the error is about.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Spreadsheet { path, .. }
            | Self::NoWorksheet { path }
            | Self::TempCopy { path, .. }
            | Self::UnsupportedFormat { path } => path,
        }
    }

    /// Whether retrying on a copy of the file could help.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::UnsupportedFormat { .. } | Self::TempCopy { .. })
    }
}
