//! Shared helpers for unit tests.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::path::Path;

/// Writes `rows` into the first worksheet of a new `.xlsx` file at `path`.
///
/// Cell `(0, 0)` of `rows` lands in `A1`.
pub(crate) fn write_workbook(path: &Path, rows: &[&[&str]]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();

    for (row_index, row) in (1_u32..).zip(rows) {
        for (col_index, value) in (1_u32..).zip(row.iter()) {
            sheet.get_cell_mut((col_index, row_index)).set_value(*value);
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Writes UTF-8 `content` to `name` inside `dir` and returns the full path.
pub(crate) fn write_text(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
