//! Record-level normalization primitives.
//!
//! All functions operate on `serde_json::Map`, which is insertion-ordered in
//! this workspace; key order in the cleaned record follows the raw record.

use benchwright_core::contract;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Strings coerced to `true`, after trimming and case-folding.
const TRUE_WORDS: &[&str] = &["true", "yes", "1", "t"];

/// Strings coerced to `false`, after trimming and case-folding.
const FALSE_WORDS: &[&str] = &["false", "no", "0", "f", "none", ""];

/// Coerce a submitted value to a boolean. Total over all inputs.
///
/// Strings are trimmed and case-folded, then matched against the true and
/// false word sets. Any other non-empty string coerces to `true`; observed
/// behavior of the platform submission path, kept as-is even though it means
/// a typo'd flag value silently becomes true.
#[must_use]
pub fn normalize_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let folded = s.trim().to_lowercase();
            if TRUE_WORDS.contains(&folded.as_str()) {
                true
            } else if FALSE_WORDS.contains(&folded.as_str()) {
                false
            } else {
                true
            }
        }
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Stringify one submitted value for list membership.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // R-facing spelling, matching the boolean widget's truevalue.
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Extract the list submitted for `name`.
///
/// Prefers the repeat container `{name}_repeat` (a sequence of
/// `{"value": ...}` records); falls back to `params[name]` as a plain list
/// or scalar. Every entry is stringified and trimmed, and entries empty
/// after trimming are dropped. A missing key yields an empty list.
#[must_use]
pub fn extract_list(params: &Map<String, Value>, name: &str) -> Vec<String> {
    if let Some(Value::Array(items)) = params.get(&contract::repeat_name(name)) {
        return items
            .iter()
            .filter_map(|item| item.get(contract::REPEAT_VALUE_FIELD))
            .map(|v| value_to_string(v).trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    match params.get(name) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| value_to_string(v).trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(scalar) => {
            let s = value_to_string(scalar).trim().to_string();
            if s.is_empty() { Vec::new() } else { vec![s] }
        }
    }
}

/// Split delimited text into trimmed, non-empty pieces.
///
/// `None` or empty input yields an empty list.
#[must_use]
pub fn parse_delimited(text: Option<&str>, separator: &str) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    if text.trim().is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return vec![text.trim().to_string()];
    }
    text.split(separator)
        .map(|piece| piece.trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Decode an escaped-sequence separator as passed on a command line:
/// `\n` becomes a newline and `\t` a tab.
#[must_use]
pub fn unescape_separator(separator: &str) -> String {
    separator.replace("\\n", "\n").replace("\\t", "\t")
}

/// Merge an outputs configuration into a cleaned record.
///
/// A no-op for `None` or an empty mapping; otherwise the mapping is copied
/// verbatim under `outputs` and `save_results` is set to true.
pub fn inject_outputs(cleaned: &mut Map<String, Value>, outputs: Option<&Map<String, Value>>) {
    let Some(outputs) = outputs else { return };
    if outputs.is_empty() {
        return;
    }
    cleaned.insert("outputs".to_string(), Value::Object(outputs.clone()));
    cleaned.insert("save_results".to_string(), Value::Bool(true));
}

/// Apply boolean coercion and list processing to a raw record.
///
/// For every key in `bool_keys` the existing value is replaced with its
/// boolean coercion. For every key in `list_keys` the value is replaced with
/// either the delimited-text parse (when `delimited` configures a separator
/// for it) or the repeat/list extraction, removing the `{key}_repeat` source
/// key. Every other key passes through unmodified.
#[must_use]
pub fn process_params(
    params: &Map<String, Value>,
    bool_keys: &[String],
    list_keys: &[String],
    delimited: &IndexMap<String, String>,
) -> Map<String, Value> {
    let mut cleaned = params.clone();

    for key in bool_keys {
        if let Some(value) = cleaned.get(key) {
            let coerced = normalize_boolean(value);
            cleaned.insert(key.clone(), Value::Bool(coerced));
        }
    }

    for key in list_keys {
        let values = match delimited.get(key) {
            Some(separator) => {
                parse_delimited(cleaned.get(key).and_then(Value::as_str), separator)
            }
            None => extract_list(&cleaned, key),
        };
        // shift_remove keeps the surviving keys in submission order.
        cleaned.shift_remove(&contract::repeat_name(key));
        cleaned.insert(
            key.clone(),
            Value::Array(values.into_iter().map(Value::String).collect()),
        );
    }

    cleaned
}

/// Flatten a record by one level.
///
/// Values that are themselves mappings have their entries merged up into the
/// top level; mappings nested two levels deep stay nested. Keys are visited
/// in record order and a later occurrence wins on collision. Any key at
/// either level containing `_repeat` is dropped entirely.
#[must_use]
pub fn flatten_params(params: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    for (key, value) in params {
        if contract::is_repeat_key(key) {
            continue;
        }
        match value {
            Value::Object(nested) => {
                for (inner_key, inner_value) in nested {
                    if contract::is_repeat_key(inner_key) {
                        continue;
                    }
                    flat.insert(inner_key.clone(), inner_value.clone());
                }
            }
            other => {
                flat.insert(key.clone(), other.clone());
            }
        }
    }
    flat
}

/// Remove every key whose value is an empty sequence, an empty or
/// whitespace-only string, or null. All other values pass through unchanged.
pub fn prune_empty(params: &mut Map<String, Value>) {
    params.retain(|_, value| match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        _ => true,
    });
}
