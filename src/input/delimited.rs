//! Delimited text (CSV-like) input.
//!
//! The first line decides the separator: when it starts with `Context`, the
//! character right after that word is used, otherwise a comma. Every line is
//! split on its own; fields may be wrapped in double quotes, and a doubled
//! quote inside a quoted field stands for one literal quote.

use std::borrow::Cow;
use std::mem;

use super::Table;

/// Separator used when the header doesn't announce one.
pub const DEFAULT_SEPARATOR: char = ',';

/// Word a header line has to start with for separator detection.
const HEADER_MARKER: &str = "Context";

/// Quote character for fields containing separators or quotes.
const QUOTE: char = '"';

/// Result of splitting a delimited text into lines and fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedText {
    /// Separator detected from the first line.
    pub separator: char,
    /// Header followed by data rows, fields already unquoted.
    pub table: Table,
    /// Non-blank lines that didn't have enough fields to be read.
    pub skipped_lines: usize,
}

/// Picks the field separator from the first line of a file.
///
/// # Examples
/// ```
/// use translation_table::input::delimited::detect_separator;
///
/// assert_eq!(detect_separator("Context;Reference;en"), ';');
/// assert_eq!(detect_separator("Key;Reference;en"), ',');
/// ```
#[must_use]
pub fn detect_separator(first_line: &str) -> char {
    first_line
        .strip_prefix(HEADER_MARKER)
        .and_then(|rest| rest.chars().next())
        .filter(|c| !matches!(*c, QUOTE | '\r' | '\n'))
        .unwrap_or(DEFAULT_SEPARATOR)
}

/// Where the splitter is within the current field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// Nothing read yet for this field.
    Start,
    /// Inside a field that didn't open with a quote.
    Unquoted,
    /// Inside a quoted field.
    Quoted,
    /// Just saw a quote inside a quoted field: either an escape or the closing quote.
    QuoteEscape,
}

/// Splits one line into fields.
///
/// Quotes only open a quoted field at the very start of a field; elsewhere
/// they are plain text. An unterminated quoted field runs to the end of the line.
///
/// # Examples
/// ```
/// use translation_table::input::delimited::split_fields;
///
/// let fields = split_fields(r#"A,"Hello, ""World""",Hi"#, ',');
/// assert_eq!(fields, vec!["A", r#"Hello, "World""#, "Hi"]);
/// ```
#[must_use]
pub fn split_fields(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = FieldState::Start;

    for c in line.chars() {
        state = match state {
            FieldState::Start | FieldState::Unquoted if c == separator => {
                fields.push(mem::take(&mut field));
                FieldState::Start
            }
            FieldState::Start if c == QUOTE => FieldState::Quoted,
            FieldState::Start | FieldState::Unquoted => {
                field.push(c);
                FieldState::Unquoted
            }
            FieldState::Quoted if c == QUOTE => FieldState::QuoteEscape,
            FieldState::Quoted => {
                field.push(c);
                FieldState::Quoted
            }
            FieldState::QuoteEscape if c == QUOTE => {
                field.push(QUOTE);
                FieldState::Quoted
            }
            FieldState::QuoteEscape if c == separator => {
                fields.push(mem::take(&mut field));
                FieldState::Start
            }
            FieldState::QuoteEscape => {
                field.push(c);
                FieldState::Unquoted
            }
        };
    }

    fields.push(field);
    fields
}

/// Reverses CSV quoting on a single value.
///
/// A value wrapped in double quotes loses them and has its doubled quotes
/// collapsed; anything else is returned untouched.
///
/// # Examples
/// ```
/// use translation_table::input::delimited::unquote_field;
///
/// assert_eq!(unquote_field(r#""say ""hi""""#), r#"say "hi""#);
/// assert_eq!(unquote_field("plain"), "plain");
/// ```
#[must_use]
pub fn unquote_field(value: &str) -> Cow<'_, str> {
    match value.strip_prefix(QUOTE).and_then(|v| v.strip_suffix(QUOTE)) {
        Some(inner) if inner.contains("\"\"") => Cow::Owned(inner.replace("\"\"", "\"")),
        Some(inner) => Cow::Borrowed(inner),
        None => Cow::Borrowed(value),
    }
}

/// Splits `text` into lines ending in `\r\n`, `\n` or a lone `\r`.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Splits `text` into a header plus data rows.
///
/// The header is the first line with more than `fixed_columns` fields, i.e.
/// one carrying at least one language column. Later lines need the same to
/// count as data rows; shorter ones are dropped.
#[must_use]
pub fn parse(text: &str, fixed_columns: usize) -> DelimitedText {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let separator = lines(text).next().map_or(DEFAULT_SEPARATOR, detect_separator);

    let mut rows = Vec::new();
    let mut skipped_lines = 0;
    for line in lines(text) {
        let fields = split_fields(line, separator);
        if fields.len() > fixed_columns {
            rows.push(fields);
        } else if !line.trim().is_empty() {
            skipped_lines += 1;
        }
    }

    tracing::debug!(
        separator = ?separator,
        rows = rows.len(),
        skipped_lines,
        "Split delimited text"
    );

    DelimitedText { separator, table: Table::from_rows(rows), skipped_lines }
}
