//! Wire contract between the synthesizer and the runtime normalizer.
//!
//! The synthesized command text and the normalizer's accepted flag
//! vocabulary are not tied together by any shared type at the platform
//! boundary, so both sides consume the constants here instead of duplicating
//! literals. Changing a value here changes both sides in lockstep; changing
//! either side anywhere else breaks the pipeline silently.

/// Suffix naming the repeat container that wraps a list-typed parameter.
pub const REPEAT_SUFFIX: &str = "_repeat";

/// Field name of the single inner widget inside a repeat container.
pub const REPEAT_VALUE_FIELD: &str = "value";

/// Program name of the runtime normalizer, as invoked by the command text.
pub const NORMALIZER_PROGRAM: &str = "benchwright-normalize";

/// Flag naming the keys to boolean-coerce.
pub const BOOL_VALUES_FLAG: &str = "--bool-values";

/// Flag naming the keys to list-process (bare names, never `_repeat`).
pub const LIST_VALUES_FLAG: &str = "--list-values";

/// Flag supplying the separator for delimited free-text fields.
pub const LIST_SEP_FLAG: &str = "--list-sep";

/// Flag naming which list keys parse as delimited text instead of repeats.
pub const LIST_FIELDS_FLAG: &str = "--list-fields";

/// Working-directory file holding the platform's raw parameter dump.
pub const PARAMS_FILE: &str = "params.json";

/// Working-directory file holding the normalized parameter record.
pub const CLEANED_PARAMS_FILE: &str = "cleaned_params.json";

/// Default separator for delimited free-text fields.
pub const DEFAULT_LIST_SEPARATOR: &str = ";";

/// Key the normalizer always injects naming the serialized result object.
pub const RESULT_OBJECT_KEY: &str = "result_object_rds";

/// Working-directory file the injected result-object key points at.
pub const RESULT_OBJECT_FILE: &str = "result_object.rds";

/// Punctuation allow-listed by the sanitizer for keys carrying delimited
/// biological notation. Asserted character-by-character by conformance
/// tests; extending is safe, shrinking is not.
pub const SANITIZER_ALLOWED_CHARS: &[char] =
    &[';', '+', '<', '>', '/', ',', '.', '-', '(', ')', ' '];

/// Name of the repeat container for a list-typed parameter key.
#[must_use]
pub fn repeat_name(key: &str) -> String {
    format!("{}{}", key, REPEAT_SUFFIX)
}

/// Whether a key is (or contains) a repeat-container name.
///
/// Matches the suffix anywhere in the key: the flattening step drops every
/// such key, even ones unrelated to list processing.
#[must_use]
pub fn is_repeat_key(key: &str) -> bool {
    key.contains(REPEAT_SUFFIX)
}

/// Whether a parameter key carries delimited biological notation and needs
/// the extended sanitizer allow-list plus delimited-text parsing.
#[must_use]
pub fn needs_special_chars(key: &str) -> bool {
    key.contains("Anchor") || key.contains("List")
}
