//! Parameter-type classifier.
//!
//! This is the single source of truth for how an abstract type tag maps to a
//! widget shape and to runtime normalization requirements. Both the
//! synthesizer (widget choice) and the command compiler (which flag a key
//! appears under) consult this table; the normalizer sees its decisions
//! threaded through the synthesized command text.

use serde::{Deserialize, Serialize};

/// Widget kinds in the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Free-text entry
    Text,
    /// Checkbox
    Boolean,
    /// Integer entry, optionally bounded
    Integer,
    /// Float entry, optionally bounded
    Float,
    /// Single-choice dropdown
    Select,
    /// Multi-choice dropdown; always optional
    MultiSelect,
    /// Repeated container wrapping one inner text widget
    Repeat,
    /// Dataset picker with a declared format
    Data,
}

/// Classification of one parameter-type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamClass {
    /// Widget shape to render
    pub widget: WidgetKind,
    /// Whether the submitted value must be boolean-coerced at runtime
    pub is_boolean: bool,
    /// Whether the submitted value must be unpacked as a list at runtime
    pub is_list_like: bool,
    /// Whether min/max attributes apply when the blueprint supplies them
    pub needs_bounds: bool,
    /// Lower bound implied by the tag itself, independent of the blueprint
    pub implied_min: Option<i64>,
    /// Accepted dataset format, for data widgets only
    pub data_format: Option<String>,
}

impl ParamClass {
    fn plain(widget: WidgetKind) -> Self {
        Self {
            widget,
            is_boolean: false,
            is_list_like: false,
            needs_bounds: false,
            implied_min: None,
            data_format: None,
        }
    }
}

/// Classify a parameter-type tag.
///
/// Total over all inputs: tags outside the closed vocabulary fall back to a
/// text widget rather than failing. Matching is case-sensitive.
#[must_use]
pub fn classify(param_type: &str) -> ParamClass {
    match param_type {
        "STRING" => ParamClass::plain(WidgetKind::Text),
        "BOOLEAN" => ParamClass {
            is_boolean: true,
            ..ParamClass::plain(WidgetKind::Boolean)
        },
        "INTEGER" => ParamClass {
            needs_bounds: true,
            ..ParamClass::plain(WidgetKind::Integer)
        },
        "Positive integer" => ParamClass {
            needs_bounds: true,
            implied_min: Some(1),
            ..ParamClass::plain(WidgetKind::Integer)
        },
        "FLOAT" => ParamClass {
            needs_bounds: true,
            ..ParamClass::plain(WidgetKind::Float)
        },
        "SELECT" => ParamClass::plain(WidgetKind::Select),
        "MULTISELECT" => ParamClass {
            is_list_like: true,
            ..ParamClass::plain(WidgetKind::MultiSelect)
        },
        "LIST" => ParamClass {
            is_list_like: true,
            ..ParamClass::plain(WidgetKind::Repeat)
        },
        "TABULAR" | "CSV" | "TSV" | "TXT" | "RDS" => ParamClass {
            data_format: Some(param_type.to_lowercase()),
            ..ParamClass::plain(WidgetKind::Data)
        },
        // Unrecognized tags degrade to free text rather than failing.
        _ => ParamClass::plain(WidgetKind::Text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_text() {
        let c = classify("STRING");
        assert_eq!(c.widget, WidgetKind::Text);
        assert!(!c.is_boolean);
        assert!(!c.is_list_like);
    }

    #[test]
    fn test_boolean() {
        let c = classify("BOOLEAN");
        assert_eq!(c.widget, WidgetKind::Boolean);
        assert!(c.is_boolean);
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(classify("INTEGER").needs_bounds);
        assert!(classify("FLOAT").needs_bounds);
        assert_eq!(classify("INTEGER").implied_min, None);
    }

    #[test]
    fn test_positive_integer_implies_min() {
        let c = classify("Positive integer");
        assert_eq!(c.widget, WidgetKind::Integer);
        assert_eq!(c.implied_min, Some(1));
    }

    #[test]
    fn test_select_kinds() {
        assert_eq!(classify("SELECT").widget, WidgetKind::Select);
        let multi = classify("MULTISELECT");
        assert_eq!(multi.widget, WidgetKind::MultiSelect);
        assert!(multi.is_list_like);
    }

    #[test]
    fn test_list_is_repeat_and_list_like() {
        let c = classify("LIST");
        assert_eq!(c.widget, WidgetKind::Repeat);
        assert!(c.is_list_like);
    }

    #[test]
    fn test_dataset_tags_lowercase_format() {
        let c = classify("TABULAR");
        assert_eq!(c.widget, WidgetKind::Data);
        assert_eq!(c.data_format.as_deref(), Some("tabular"));
        assert_eq!(classify("CSV").data_format.as_deref(), Some("csv"));
    }

    #[test]
    fn test_unrecognized_falls_back_to_text() {
        assert_eq!(classify("MYSTERY").widget, WidgetKind::Text);
        // Matching is case-sensitive, so a lowercase tag is unrecognized.
        assert_eq!(classify("string").widget, WidgetKind::Text);
        assert_eq!(classify("boolean").widget, WidgetKind::Text);
    }
}
