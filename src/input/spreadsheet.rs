//! Spreadsheet (`.xlsx`) input.

use std::path::Path;

use umya_spreadsheet::Worksheet;

use super::Table;
use crate::error::LoadError;

/// Reads the first worksheet of a workbook into a [`Table`].
///
/// Cells are taken as displayed text over the full used range, so every row
/// has the same width. Rows where every cell is blank are left out.
///
/// # Errors
/// - The workbook can't be opened or parsed
/// - The workbook has no worksheet
pub fn read_first_worksheet(path: &Path) -> Result<Table, LoadError> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet =
        book.get_sheet(&0).ok_or_else(|| LoadError::NoWorksheet { path: path.to_path_buf() })?;
    let table = worksheet_to_table(sheet);

    tracing::debug!(
        path = %path.display(),
        sheet = sheet.get_name(),
        rows = table.len(),
        "Read worksheet"
    );

    Ok(table)
}

/// Copies the used range of `sheet` into a [`Table`].
fn worksheet_to_table(sheet: &Worksheet) -> Table {
    let (max_col, max_row) = sheet.get_highest_column_and_row();

    let mut table = Table::default();
    for row in 1..=max_row {
        let cells: Vec<String> = (1..=max_col).map(|col| sheet.get_value((col, row))).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        table.push_row(cells);
    }
    table
}
