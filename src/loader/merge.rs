//! Merging table rows into a [`TranslationMap`].

use std::borrow::Cow;
use std::collections::hash_map::Entry;

use super::LoadStats;
use crate::input::{
    Table,
    unquote_field,
};
use crate::types::{
    MergePolicy,
    TranslationMap,
    TranslationRecord,
    record_key,
};

/// Number of leading columns before the first language column.
#[must_use]
pub const fn fixed_columns(has_instance: bool) -> usize {
    if has_instance { 3 } else { 2 }
}

/// How cell text is turned into stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellDecoding {
    /// Cells are already plain text.
    Verbatim,
    /// Cells may still carry CSV quoting.
    Unquote,
}

impl CellDecoding {
    /// Decodes a single cell.
    fn decode(self, cell: &str) -> Cow<'_, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(cell),
            Self::Unquote => unquote_field(cell),
        }
    }
}

/// Language code that never gets stored.
fn is_blank_language(language: &str) -> bool {
    language.trim().is_empty()
}

/// Merges the data rows of `table` into `map`.
///
/// Nothing happens unless the table has a header and at least one data row.
/// Data rows without the fixed columns are skipped. Language cells beyond the
/// header width are ignored, as are columns whose header is blank.
pub(crate) fn merge_table(
    map: &mut TranslationMap,
    table: &Table,
    has_instance: bool,
    policy: MergePolicy,
    decoding: CellDecoding,
) -> LoadStats {
    let mut stats = LoadStats::default();
    let Some(header) = table.header() else {
        return stats;
    };
    if table.data_rows().is_empty() {
        return stats;
    }

    let fixed = fixed_columns(has_instance);
    // Blank names stay in the list so the columns keep lining up.
    let languages: Vec<String> =
        header.iter().skip(fixed).map(|name| decoding.decode(name).into_owned()).collect();

    for row in table.data_rows() {
        let (Some(context), Some(reference)) = (row.first(), row.get(fixed - 1)) else {
            stats.skipped_rows += 1;
            continue;
        };
        let context = decoding.decode(context).into_owned();
        let reference = decoding.decode(reference).into_owned();
        let instance = if has_instance {
            row.get(1).map(|instance| decoding.decode(instance).into_owned())
        } else {
            None
        };

        stats.data_rows += 1;
        let record = match map.entry(record_key(&context, &reference, instance.as_deref())) {
            Entry::Occupied(entry) => {
                stats.records_merged += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                stats.records_created += 1;
                entry.insert(TranslationRecord { context, instance, reference, ..Default::default() })
            }
        };

        for (language, value) in languages.iter().zip(row.iter().skip(fixed)) {
            if is_blank_language(language) {
                continue;
            }
            if record.merge_translation(language, decoding.decode(value).into_owned(), policy) {
                stats.translations_stored += 1;
            }
        }
    }

    stats.languages =
        languages.into_iter().filter(|language| !is_blank_language(language)).collect();
    stats
}
