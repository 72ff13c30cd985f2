//! Fallback for files another application holds open.
//!
//! Spreadsheet programs commonly lock the file they're editing. When the
//! first read fails, the file is copied to a temporary location and read once
//! more from there.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::LoadError;

/// Runs `read` on `path`, then once more on a temporary copy if the first
/// attempt failed.
///
/// Returns the final result and whether the copy was used. No retry happens
/// when `retry_locked` is off, the error can't be helped by a copy, or the
/// file vanished in the meantime.
pub(crate) fn read_with_retry<T, F>(
    path: &Path,
    retry_locked: bool,
    mut read: F,
) -> (Result<T, LoadError>, bool)
where
    F: FnMut(&Path) -> Result<T, LoadError>,
{
    let error = match read(path) {
        Ok(value) => return (Ok(value), false),
        Err(error) => error,
    };

    if !retry_locked || !error.is_retryable() || !path.exists() {
        return (Err(error), false);
    }

    tracing::debug!(path = %path.display(), %error, "Read failed, retrying on a temporary copy");

    let copy = match copy_to_temp(path) {
        Ok(copy) => copy,
        Err(copy_error) => return (Err(copy_error), true),
    };

    // The copy is deleted when `copy` drops at the end of this scope.
    (read(copy.path()), true)
}

/// Copies `path` into a uniquely named temporary file with the same extension.
fn copy_to_temp(path: &Path) -> Result<NamedTempFile, LoadError> {
    let to_error = |source: io::Error| LoadError::TempCopy { path: path.to_path_buf(), source };

    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut copy = tempfile::Builder::new()
        .prefix("translation-table-")
        .suffix(&suffix)
        .tempfile()
        .map_err(to_error)?;

    let mut source = fs::File::open(path).map_err(to_error)?;
    io::copy(&mut source, copy.as_file_mut()).map_err(to_error)?;

    Ok(copy)
}
