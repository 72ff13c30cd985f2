//! Generic row/column table.

/// Rows of text cells. The first row is the header.
///
/// Rows don't need to have the same width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Header row followed by data rows.
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub const fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Builds a table from string slices, mostly handy in tests and callers
    /// that assemble tables by hand.
    ///
    /// # Examples
    /// ```
    /// use translation_table::input::Table;
    ///
    /// let table = Table::from_slices(&[&["Context", "Reference", "EN"], &["A", "Hello", "Hi"]]);
    /// assert_eq!(table.data_rows().len(), 1);
    /// ```
    #[must_use]
    pub fn from_slices(rows: &[&[&str]]) -> Self {
        Self::from_rows(
            rows.iter().map(|row| row.iter().map(ToString::to_string).collect()).collect(),
        )
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header.
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}
