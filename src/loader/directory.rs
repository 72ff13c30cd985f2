//! Loading every translation table below a directory.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use super::{
    LoadOptions,
    LoadReport,
    detect_format,
    load_from_path,
};
use crate::config::{
    FileMatcher,
    LoaderSettings,
    MatcherError,
};
use crate::types::TranslationMap;

/// Loads every file below `root` selected by the settings' globs.
///
/// Files are loaded in sorted path order, so with the same files on disk the
/// map always ends up the same. Ignore files (`.gitignore` and friends) are
/// honored. One report is returned per selected file.
///
/// # Errors
/// Returns an error if an include or exclude pattern isn't a valid glob.
pub fn load_from_directory(
    map: &mut TranslationMap,
    root: &Path,
    settings: &LoaderSettings,
) -> Result<Vec<LoadReport>, MatcherError> {
    tracing::debug!(root = %root.display(), "Loading translation directory");
    let matcher = FileMatcher::new(root.to_path_buf(), settings)?;

    let reports: Vec<LoadReport> = find_translation_files(&matcher)
        .into_iter()
        .map(|path| {
            let options = detect_format(&path).map_or_else(
                || LoadOptions::new(settings.has_instance),
                |format| settings.load_options(format),
            );
            load_from_path(map, &path, options)
        })
        .collect();

    tracing::debug!(
        root = %root.display(),
        files = reports.len(),
        loaded = reports.iter().filter(|report| report.is_loaded()).count(),
        "Loaded translation directory"
    );
    Ok(reports)
}

/// Files under the matcher's root that it selects, sorted.
fn find_translation_files(matcher: &FileMatcher) -> Vec<PathBuf> {
    let root = matcher.root();
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if !matcher.is_translation_file_relative(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    found_files
}
