//! translation-table
//!
//! Loads translation tables (CSV-like text, `.xlsx` workbooks and in-memory
//! tables) into a map of translatable strings keyed by context, instance and
//! reference text.

pub mod config;
pub mod error;
pub mod input;
pub mod loader;
pub mod lookup;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use error::LoadError;
pub use loader::{
    LoadOptions,
    LoadOutcome,
    LoadReport,
    LoadStats,
    load_from_delimited_str,
    load_from_delimited_text,
    load_from_directory,
    load_from_path,
    load_from_spreadsheet,
    load_from_table,
};
pub use types::{
    MergePolicy,
    TranslationMap,
    TranslationRecord,
};
