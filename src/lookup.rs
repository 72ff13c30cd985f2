//! Looking up translations in a loaded [`TranslationMap`].

use crate::types::{
    TranslationMap,
    TranslationRecord,
    record_key,
};

/// Record for the given context, instance and reference.
#[must_use]
pub fn find<'a>(
    map: &'a TranslationMap,
    context: &str,
    instance: Option<&str>,
    reference: &str,
) -> Option<&'a TranslationRecord> {
    map.get(&record_key(context, reference, instance))
}

/// Translates `reference` into `language`.
///
/// Returns the stored translation when there is a non-empty one, otherwise
/// the reference text itself. A found record has its `usage` counter bumped
/// whether or not it had a translation.
///
/// # Examples
/// ```
/// use translation_table::lookup::translate;
/// use translation_table::types::{TranslationMap, TranslationRecord};
///
/// let mut map = TranslationMap::new();
/// let mut record = TranslationRecord::new("Form1", "Hello");
/// record.translations.insert("FR".to_string(), "Bonjour".to_string());
/// map.insert(record.key(), record);
///
/// assert_eq!(translate(&mut map, "Form1", None, "Hello", "FR"), "Bonjour");
/// assert_eq!(translate(&mut map, "Form1", None, "Hello", "DE"), "Hello");
/// ```
pub fn translate(
    map: &mut TranslationMap,
    context: &str,
    instance: Option<&str>,
    reference: &str,
    language: &str,
) -> String {
    let Some(record) = map.get_mut(&record_key(context, reference, instance)) else {
        return reference.to_string();
    };

    record.usage = record.usage.saturating_add(1);
    match record.translation(language) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => reference.to_string(),
    }
}
