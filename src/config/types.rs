use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::loader::LoadOptions;
use crate::types::{
    MergePolicy,
    SourceFormat,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for loading the translation tables of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderSettings {
    /// Tables carry an `Instance` column after `Context`.
    pub has_instance: bool,

    /// What to keep when delimited text repeats a language value.
    pub delimited_merge_policy: MergePolicy,

    /// What to keep when a spreadsheet or table repeats a language value.
    pub table_merge_policy: MergePolicy,

    /// Retry unreadable files from a temporary copy.
    pub retry_locked_files: bool,

    /// Globs, relative to the directory, selecting the tables to load.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl LoaderSettings {
    /// Load options for a source of the given format.
    #[must_use]
    pub const fn load_options(&self, format: SourceFormat) -> LoadOptions {
        let policy = match format {
            SourceFormat::Delimited => self.delimited_merge_policy,
            SourceFormat::Spreadsheet | SourceFormat::Table => self.table_merge_policy,
        };
        LoadOptions::new(self.has_instance)
            .with_merge_policy(policy)
            .with_retry_locked(self.retry_locked_files)
    }

    /// # Errors
    /// - No include pattern
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.csv\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            has_instance: false,
            delimited_merge_policy: SourceFormat::Delimited.default_merge_policy(),
            table_merge_policy: SourceFormat::Table.default_merge_policy(),
            retry_locked_files: true,
            include_patterns: vec!["**/*.csv".to_string(), "**/*.xlsx".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}
