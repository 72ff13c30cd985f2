//! Tabular sources a translation table can be read from.

pub mod delimited;
pub mod spreadsheet;
mod table;

pub use delimited::{
    DelimitedText,
    unquote_field,
};
pub use spreadsheet::read_first_worksheet;
pub use table::Table;
