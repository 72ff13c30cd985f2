//! Core types shared by the loaders and the lookup helpers.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Separator placed between the parts of a [`TranslationMap`] key.
///
/// Table and spreadsheet cells may contain it, so [`record_key`] escapes it
/// (and the escape character `\`) inside each part.
pub const KEY_SEPARATOR: char = '\r';

/// Escape character used inside key parts.
const KEY_ESCAPE: char = '\\';

/// Loaded records indexed by [`record_key`].
pub type TranslationMap = HashMap<String, TranslationRecord>;

/// One translatable string and its translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// Logical grouping (screen, form, source file).
    pub context: String,

    /// Disambiguates repeated context/reference pairs.
    /// Only set when the table was loaded with an instance column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// The canonical text being translated.
    pub reference: String,

    /// Language code to translated text.
    #[serde(default)]
    pub translations: HashMap<String, String>,

    /// Number of lookups served by this record. Loading never changes it.
    #[serde(default)]
    pub usage: u32,
}

impl TranslationRecord {
    #[must_use]
    pub fn new(context: impl Into<String>, reference: impl Into<String>) -> Self {
        Self { context: context.into(), reference: reference.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Key under which this record lives in a [`TranslationMap`].
    #[must_use]
    pub fn key(&self) -> String {
        record_key(&self.context, &self.reference, self.instance.as_deref())
    }

    /// Translated text for `language`, if any.
    #[must_use]
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }

    /// Stores `value` for `language` according to `policy`.
    ///
    /// Returns `true` if the stored value changed.
    pub fn merge_translation(
        &mut self,
        language: &str,
        value: String,
        policy: MergePolicy,
    ) -> bool {
        match self.translations.get_mut(language) {
            None => {
                self.translations.insert(language.to_string(), value);
                true
            }
            Some(existing) => match policy {
                MergePolicy::FirstWins => false,
                MergePolicy::LastWins => {
                    if *existing == value {
                        false
                    } else {
                        *existing = value;
                        true
                    }
                }
            },
        }
    }
}

/// Builds the composite lookup key.
///
/// Parts are joined with [`KEY_SEPARATOR`]. A carriage return inside a part
/// is written as `\r` and a backslash as `\\`, so distinct parts never
/// produce the same key.
///
/// # Examples
/// ```
/// use translation_table::types::record_key;
///
/// assert_eq!(record_key("Form1", "Hello", None), "Form1\rHello");
/// assert_eq!(record_key("Form1", "Hello", Some("2")), "Form1\rHello\r2");
/// ```
#[must_use]
pub fn record_key(context: &str, reference: &str, instance: Option<&str>) -> String {
    let mut key = String::with_capacity(
        context.len() + reference.len() + instance.map_or(0, |i| i.len() + 1) + 1,
    );
    push_key_part(&mut key, context);
    key.push(KEY_SEPARATOR);
    push_key_part(&mut key, reference);
    if let Some(instance) = instance {
        key.push(KEY_SEPARATOR);
        push_key_part(&mut key, instance);
    }
    key
}

/// Appends `part` to `key` with the separator and the escape character escaped.
fn push_key_part(key: &mut String, part: &str) {
    for c in part.chars() {
        match c {
            KEY_ESCAPE => key.push_str("\\\\"),
            KEY_SEPARATOR => key.push_str("\\r"),
            c => key.push(c),
        }
    }
}

/// What happens when a language value is read for a record that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MergePolicy {
    /// Keep the value that was read first.
    #[default]
    FirstWins,
    /// Replace with the value read last.
    LastWins,
}

/// Kind of tabular source a load reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// CSV-like text with a `Context` header line.
    Delimited,
    /// An `.xlsx` workbook.
    Spreadsheet,
    /// An in-memory [`crate::input::Table`].
    Table,
}

impl SourceFormat {
    /// Merge policy used when the caller doesn't pick one.
    ///
    /// Delimited text keeps the first value, tables keep the last one.
    #[must_use]
    pub const fn default_merge_policy(self) -> MergePolicy {
        match self {
            Self::Delimited => MergePolicy::FirstWins,
            Self::Spreadsheet | Self::Table => MergePolicy::LastWins,
        }
    }
}
