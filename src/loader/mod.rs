//! Loading translation tables into a [`TranslationMap`].
//!
//! Every operation merges into a caller-owned map and reports what happened
//! through a [`LoadReport`] instead of an error. A missing file leaves the map
//! as it was; a file that can't be read is retried once from a temporary copy
//! (spreadsheet programs tend to lock the files they have open), and if that
//! fails too the failure is logged and reported.
//!
//! Sources are fully read before anything is merged, so a failed load never
//! leaves half a table behind.

mod directory;
mod merge;
mod report;
mod retry;

use std::fs;
use std::path::Path;

pub use directory::load_from_directory;
pub use merge::fixed_columns;
use merge::{
    CellDecoding,
    merge_table,
};
pub use report::{
    LoadOutcome,
    LoadReport,
    LoadStats,
};

use crate::error::LoadError;
use crate::input::{
    Table,
    delimited,
    read_first_worksheet,
};
use crate::types::{
    MergePolicy,
    SourceFormat,
    TranslationMap,
};

/// How a source is laid out and merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// The table has an `Instance` column between `Context` and `Reference`.
    pub has_instance: bool,
    /// Overrides the per-format default from
    /// [`SourceFormat::default_merge_policy`].
    pub merge_policy: Option<MergePolicy>,
    /// Retry unreadable files from a temporary copy.
    pub retry_locked: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { has_instance: false, merge_policy: None, retry_locked: true }
    }
}

impl LoadOptions {
    #[must_use]
    pub const fn new(has_instance: bool) -> Self {
        Self { has_instance, merge_policy: None, retry_locked: true }
    }

    #[must_use]
    pub const fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = Some(policy);
        self
    }

    #[must_use]
    pub const fn with_retry_locked(mut self, retry_locked: bool) -> Self {
        self.retry_locked = retry_locked;
        self
    }

    /// Number of leading columns before the language columns.
    #[must_use]
    pub const fn fixed_columns(&self) -> usize {
        fixed_columns(self.has_instance)
    }

    /// Merge policy that applies to `format`.
    #[must_use]
    pub const fn merge_policy_for(&self, format: SourceFormat) -> MergePolicy {
        match self.merge_policy {
            Some(policy) => policy,
            None => format.default_merge_policy(),
        }
    }
}

/// Guesses the source format from a file extension.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use translation_table::loader::detect_format;
/// use translation_table::types::SourceFormat;
///
/// assert_eq!(detect_format(Path::new("texts.CSV")), Some(SourceFormat::Delimited));
/// assert_eq!(detect_format(Path::new("texts.xlsx")), Some(SourceFormat::Spreadsheet));
/// assert_eq!(detect_format(Path::new("texts.json")), None);
/// ```
#[must_use]
pub fn detect_format(path: &Path) -> Option<SourceFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "csv" | "tsv" | "txt" => Some(SourceFormat::Delimited),
        "xlsx" | "xlsm" => Some(SourceFormat::Spreadsheet),
        _ => None,
    }
}

/// Loads a delimited text file (see [`crate::input::delimited`]).
///
/// Duplicate language values keep the first one read unless
/// `options.merge_policy` says otherwise.
pub fn load_from_delimited_text(
    map: &mut TranslationMap,
    path: impl AsRef<Path>,
    options: LoadOptions,
) -> LoadReport {
    let path = path.as_ref();
    let policy = options.merge_policy_for(SourceFormat::Delimited);

    load_file(map, path, options, |attempt| {
        let bytes = fs::read(attempt)
            .map_err(|source| LoadError::Io { path: attempt.to_path_buf(), source })?;
        let text = String::from_utf8_lossy(&bytes);
        let parsed = delimited::parse(&text, options.fixed_columns());
        Ok((parsed.table, parsed.skipped_lines, CellDecoding::Verbatim, policy))
    })
}

/// Loads delimited text that is already in memory.
///
/// Behaves like [`load_from_delimited_text`] minus the file handling.
pub fn load_from_delimited_str(
    map: &mut TranslationMap,
    text: &str,
    options: LoadOptions,
) -> LoadReport {
    let parsed = delimited::parse(text, options.fixed_columns());
    let mut stats = merge_table(
        map,
        &parsed.table,
        options.has_instance,
        options.merge_policy_for(SourceFormat::Delimited),
        CellDecoding::Verbatim,
    );
    stats.skipped_rows += parsed.skipped_lines;
    LoadReport::loaded(None, false, stats)
}

/// Loads the first worksheet of an `.xlsx` workbook.
///
/// Duplicate language values keep the last one read unless
/// `options.merge_policy` says otherwise.
pub fn load_from_spreadsheet(
    map: &mut TranslationMap,
    path: impl AsRef<Path>,
    options: LoadOptions,
) -> LoadReport {
    let path = path.as_ref();
    let policy = options.merge_policy_for(SourceFormat::Spreadsheet);

    load_file(map, path, options, |attempt| {
        let table = read_first_worksheet(attempt)?;
        Ok((table, 0, CellDecoding::Unquote, policy))
    })
}

/// Loads an in-memory table whose first row is the header.
///
/// Cells may still carry CSV quoting; it is removed before storing. Duplicate
/// language values keep the last one read unless `options.merge_policy` says
/// otherwise.
pub fn load_from_table(
    map: &mut TranslationMap,
    table: &Table,
    options: LoadOptions,
) -> LoadReport {
    let stats = merge_table(
        map,
        table,
        options.has_instance,
        options.merge_policy_for(SourceFormat::Table),
        CellDecoding::Unquote,
    );
    tracing::debug!(
        rows = stats.data_rows,
        created = stats.records_created,
        merged = stats.records_merged,
        "Loaded translation table"
    );
    LoadReport::loaded(None, false, stats)
}

/// Loads a file, picking the reader from its extension.
///
/// Unknown extensions are reported as [`LoadError::UnsupportedFormat`]
/// without touching the file.
pub fn load_from_path(
    map: &mut TranslationMap,
    path: impl AsRef<Path>,
    options: LoadOptions,
) -> LoadReport {
    let path = path.as_ref();
    match detect_format(path) {
        Some(SourceFormat::Delimited) => load_from_delimited_text(map, path, options),
        Some(SourceFormat::Spreadsheet) => load_from_spreadsheet(map, path, options),
        Some(SourceFormat::Table) | None if !path.is_file() => LoadReport::not_found(path),
        Some(SourceFormat::Table) | None => {
            tracing::debug!(path = %path.display(), "Unsupported translation file");
            let error = LoadError::UnsupportedFormat { path: path.to_path_buf() };
            LoadReport::failed(path, false, error)
        }
    }
}

/// A read source: rows, lines skipped while reading, cell decoding and merge policy.
type ReadSource = (Table, usize, CellDecoding, MergePolicy);

/// Shared file handling: existence check, retry, merge and logging.
fn load_file<F>(
    map: &mut TranslationMap,
    path: &Path,
    options: LoadOptions,
    read: F,
) -> LoadReport
where
    F: FnMut(&Path) -> Result<ReadSource, LoadError>,
{
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "Translation file not found");
        return LoadReport::not_found(path);
    }

    let (result, retried) = retry::read_with_retry(path, options.retry_locked, read);
    match result {
        Ok((table, skipped_lines, decoding, policy)) => {
            let mut stats = merge_table(map, &table, options.has_instance, policy, decoding);
            stats.skipped_rows += skipped_lines;
            tracing::debug!(
                path = %path.display(),
                retried,
                rows = stats.data_rows,
                created = stats.records_created,
                merged = stats.records_merged,
                "Loaded translation file"
            );
            LoadReport::loaded(Some(path), retried, stats)
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), retried, %error, "Failed to load translation file");
            LoadReport::failed(path, retried, error)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::{
        write_text,
        write_workbook,
    };
    use crate::types::TranslationRecord;

    const TWO_ROWS: &str = "Context,Reference,EN,FR\nA,Hello,Hi,Salut\nA,Hello,Hey,Bonjour\n";

    #[googletest::test]
    fn test_delimited_first_write_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_text(dir.path(), "t.csv", TWO_ROWS);
        let mut map = TranslationMap::new();

        let report = load_from_delimited_text(&mut map, &path, LoadOptions::new(false));

        expect_that!(report.is_loaded(), eq(true));
        expect_that!(report.retried, eq(false));
        let record = map.get("A\rHello").unwrap();
        expect_that!(record.context, eq("A"));
        expect_that!(record.reference, eq("Hello"));
        expect_that!(record.instance.as_deref(), none());
        expect_that!(record.translation("EN"), some(eq("Hi")));
        expect_that!(record.translation("FR"), some(eq("Salut")));
    }

    #[googletest::test]
    fn test_delimited_str_with_carriage_return_lines() {
        let mut map = TranslationMap::new();

        let report = load_from_delimited_str(
            &mut map,
            "Context,Reference,EN\rA,Hello,Hi\r",
            LoadOptions::default(),
        );

        expect_that!(map.len(), eq(1));
        expect_that!(map.get("A\rHello").unwrap().translation("EN"), some(eq("Hi")));
        expect_that!(report.stats().unwrap().data_rows, eq(1));
    }

    #[googletest::test]
    fn test_delimited_policy_override() {
        let mut map = TranslationMap::new();

        load_from_delimited_str(
            &mut map,
            TWO_ROWS,
            LoadOptions::new(false).with_merge_policy(MergePolicy::LastWins),
        );

        expect_that!(map.get("A\rHello").unwrap().translation("EN"), some(eq("Hey")));
    }

    #[googletest::test]
    fn test_table_last_write_wins() {
        let table = Table::from_slices(&[
            &["Context", "Reference", "EN", "FR"],
            &["A", "Hello", "Hi", "Salut"],
            &["A", "Hello", "Hey", "Bonjour"],
        ]);
        let mut map = TranslationMap::new();

        let report = load_from_table(&mut map, &table, LoadOptions::new(false));

        expect_that!(report.source, none());
        let record = map.get("A\rHello").unwrap();
        expect_that!(record.translation("EN"), some(eq("Hey")));
        expect_that!(record.translation("FR"), some(eq("Bonjour")));
    }

    #[googletest::test]
    fn test_delimited_with_instance() {
        let mut map = TranslationMap::new();

        load_from_delimited_str(
            &mut map,
            "Context,Instance,Reference,EN\nA,1,Hello,Hi\nA,2,Hello,Yo\n",
            LoadOptions::new(true),
        );

        expect_that!(map.len(), eq(2));
        expect_that!(map.get("A\rHello\r1").unwrap().translation("EN"), some(eq("Hi")));
        expect_that!(map.get("A\rHello\r2").unwrap().translation("EN"), some(eq("Yo")));
    }

    #[googletest::test]
    fn test_quoted_field_is_a_single_value() {
        let mut map = TranslationMap::new();

        load_from_delimited_str(
            &mut map,
            "Context,Reference,EN\nA,\"Hello, \"\"World\"\"\",Hi\n",
            LoadOptions::default(),
        );

        let record = map.get("A\rHello, \"World\"").unwrap();
        expect_that!(record.reference, eq("Hello, \"World\""));
        expect_that!(record.translation("EN"), some(eq("Hi")));
    }

    #[googletest::test]
    fn test_unmarked_header_assumes_comma() {
        let mut map = TranslationMap::new();

        // ';' appears in the line but the header doesn't start with the marker
        let report = load_from_delimited_str(
            &mut map,
            "Key,Reference,EN;FR\nA,Hello,Hi;Salut\n",
            LoadOptions::default(),
        );

        let record = map.get("A\rHello").unwrap();
        expect_that!(record.translation("EN;FR"), some(eq("Hi;Salut")));
        expect_that!(report.stats().unwrap().languages, elements_are![eq("EN;FR")]);
    }

    #[googletest::test]
    fn test_short_rows_produce_nothing() {
        let mut map = TranslationMap::new();

        let report = load_from_delimited_str(
            &mut map,
            "Context,Reference,EN\nA\nB,Bye\n",
            LoadOptions::default(),
        );

        expect_that!(map.is_empty(), eq(true));
        expect_that!(report.stats().unwrap().skipped_rows, eq(2));
        expect_that!(report.error().is_none(), eq(true));
    }

    #[googletest::test]
    fn test_missing_file_leaves_map_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut map = TranslationMap::new();
        let record = TranslationRecord::new("A", "Hello");
        map.insert(record.key(), record);
        let before = map.clone();

        let options = LoadOptions::default();
        let csv = load_from_delimited_text(&mut map, dir.path().join("nope.csv"), options);
        let xlsx = load_from_spreadsheet(&mut map, dir.path().join("nope.xlsx"), options);
        let other = load_from_path(&mut map, dir.path().join("nope.json"), options);

        expect_that!(csv.is_not_found(), eq(true));
        expect_that!(xlsx.is_not_found(), eq(true));
        expect_that!(other.is_not_found(), eq(true));
        assert_eq!(map, before);
    }

    #[googletest::test]
    fn test_load_is_repeatable() {
        let mut first = TranslationMap::new();
        let mut second = TranslationMap::new();

        load_from_delimited_str(&mut first, TWO_ROWS, LoadOptions::default());
        load_from_delimited_str(&mut second, TWO_ROWS, LoadOptions::default());

        assert_eq!(first, second);
    }

    #[googletest::test]
    fn test_spreadsheet_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.xlsx");
        write_workbook(
            &path,
            &[
                &["Context", "Reference", "EN", "FR"],
                &["A", "Hello", "Hi", "Salut"],
                &["A", "Hello", "Hey", "Bonjour"],
            ],
        );
        let mut map = TranslationMap::new();

        let report = load_from_spreadsheet(&mut map, &path, LoadOptions::default());

        expect_that!(report.is_loaded(), eq(true));
        let record = map.get("A\rHello").unwrap();
        expect_that!(record.translation("EN"), some(eq("Hey")));
        expect_that!(record.translation("FR"), some(eq("Bonjour")));
    }

    #[googletest::test]
    fn test_corrupt_spreadsheet_is_reported_after_retry() {
        let dir = TempDir::new().unwrap();
        let path = write_text(dir.path(), "t.xlsx", "garbage");
        let mut map = TranslationMap::new();

        let report = load_from_spreadsheet(&mut map, &path, LoadOptions::default());

        expect_that!(report.retried, eq(true));
        assert!(matches!(report.outcome, LoadOutcome::Failed(LoadError::Spreadsheet { .. })));
        expect_that!(map.is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_corrupt_spreadsheet_without_retry() {
        let dir = TempDir::new().unwrap();
        let path = write_text(dir.path(), "t.xlsx", "garbage");
        let mut map = TranslationMap::new();

        let report = load_from_spreadsheet(
            &mut map,
            &path,
            LoadOptions::default().with_retry_locked(false),
        );

        expect_that!(report.retried, eq(false));
        expect_that!(report.error().is_some(), eq(true));
    }

    #[rstest]
    #[case("a.csv", true)]
    #[case("a.TXT", true)]
    #[case("a.xlsx", true)]
    #[case("a.json", false)]
    #[case("noext", false)]
    fn test_load_from_path_dispatch(#[case] name: &str, #[case] supported: bool) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        if name.ends_with("xlsx") {
            write_workbook(&path, &[&["Context", "Reference", "EN"], &["A", "Hello", "Hi"]]);
        } else {
            std::fs::write(&path, "Context,Reference,EN\nA,Hello,Hi\n").unwrap();
        }
        let mut map = TranslationMap::new();

        let report = load_from_path(&mut map, &path, LoadOptions::default());

        assert_eq!(report.is_loaded(), supported);
        assert_eq!(map.contains_key("A\rHello"), supported);
        if !supported {
            assert!(matches!(report.error(), Some(LoadError::UnsupportedFormat { .. })));
        }
    }

    #[googletest::test]
    fn test_utf8_bom_and_semicolon_file() {
        let dir = TempDir::new().unwrap();
        let path =
            write_text(dir.path(), "t.csv", "\u{feff}Context;Reference;DE\nA;Hello;Grüß dich\n");
        let mut map = TranslationMap::new();

        load_from_delimited_text(&mut map, &path, LoadOptions::default());

        expect_that!(map.get("A\rHello").unwrap().translation("DE"), some(eq("Grüß dich")));
    }
}
