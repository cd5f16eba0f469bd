//! Blueprint data model.
//!
//! A blueprint is the declarative JSON description of a wrapped R function:
//! its input datasets, parameters, column selectors, and output artifacts.
//! Blueprints are externally supplied and read-only; every field defaults to
//! empty when absent, and a missing field degrades to empty output rather
//! than an error. There is no validation step that rejects a blueprint.

use crate::error::CoreResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative description of a wrapped function's interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blueprint {
    /// Human-readable tool title
    pub title: String,
    /// Tool description; may contain markdown links
    pub description: String,
    /// Name of the wrapped R function, used as the tool identity seed
    pub r_function: String,
    /// Dataset inputs, in render order
    #[serde(rename = "inputDatasets")]
    pub input_datasets: Vec<ParamSpec>,
    /// Scalar and list parameters, in render order
    pub parameters: Vec<ParamSpec>,
    /// Column selectors, in render order
    pub columns: Vec<ColumnSpec>,
    /// Output artifacts, name -> spec, in declaration order
    pub outputs: IndexMap<String, OutputSpec>,
    /// Optional override establishing final relative order of inputs
    #[serde(rename = "orderedMustacheKeys")]
    pub ordered_mustache_keys: Vec<String>,
}

impl Blueprint {
    /// Parse a blueprint from JSON text.
    ///
    /// Unknown fields are ignored and missing fields default to empty; the
    /// only failure mode is text that is not a JSON record at all.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidBlueprint`] when the text fails to
    /// parse.
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One parameter (or input dataset) declaration.
///
/// Input datasets are structurally identical to parameters and reuse this
/// type with a subset of fields populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSpec {
    /// Unique key within the blueprint (uniqueness is not enforced;
    /// duplicates silently render duplicate widgets)
    pub key: String,
    /// Widget label
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Type tag from the closed vocabulary, e.g. `STRING`, `LIST`, `TABULAR`
    #[serde(rename = "paramType")]
    pub param_type: String,
    /// Default value; shape depends on the type tag
    #[serde(rename = "defaultValue")]
    pub default_value: Option<Value>,
    /// Lower bound, only meaningful for numeric types
    #[serde(rename = "paramMin")]
    pub param_min: Option<Value>,
    /// Upper bound, only meaningful for numeric types
    #[serde(rename = "paramMax")]
    pub param_max: Option<Value>,
    /// Choices, only meaningful for SELECT/MULTISELECT
    #[serde(rename = "paramValues")]
    pub param_values: Vec<Value>,
    /// Parameters sharing a group render inside one section
    #[serde(rename = "paramGroup")]
    pub param_group: Option<String>,
    /// Whether the widget may be left unset
    pub optional: bool,
    /// Help text; may contain markdown links
    pub description: String,
}

/// One column-selector declaration.
///
/// Columns carry an `isMulti` switch instead of a type tag: a single column
/// renders as a text widget, a multi column as a repeat container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Unique key within the blueprint
    pub key: String,
    /// Widget label
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Help text
    pub description: String,
    /// Whether the selector accepts multiple values
    #[serde(rename = "isMulti")]
    pub is_multi: bool,
    /// Default value
    #[serde(rename = "defaultValue")]
    pub default_value: Option<Value>,
}

/// One declared output artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    /// Artifact kind: `"file"` or `"directory"`; anything else is skipped
    /// at synthesis time
    #[serde(rename = "type")]
    pub kind: String,
    /// File name or directory path inside the working directory
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_defaults() {
        let bp = Blueprint::from_json_str("{}").unwrap();
        assert_eq!(bp, Blueprint::default());
        assert!(bp.parameters.is_empty());
        assert!(bp.outputs.is_empty());
    }

    #[test]
    fn test_camel_case_field_names() {
        let bp = Blueprint::from_json_str(
            r#"{
                "title": "Test Tool",
                "description": "A test tool",
                "r_function": "test_function",
                "inputDatasets": [
                    {"key": "input_file", "displayName": "Input File", "paramType": "TABULAR"}
                ],
                "parameters": [
                    {
                        "key": "n_neighbors",
                        "displayName": "Neighbors",
                        "paramType": "INTEGER",
                        "defaultValue": 10,
                        "paramMin": 1,
                        "paramMax": 100,
                        "paramGroup": "Advanced",
                        "optional": true,
                        "description": "How many neighbors"
                    }
                ],
                "columns": [
                    {"key": "sample_col", "displayName": "Sample", "isMulti": true}
                ],
                "outputs": {
                    "result": {"type": "file", "name": "result.csv"}
                },
                "orderedMustacheKeys": ["input_file", "n_neighbors"]
            }"#,
        )
        .unwrap();

        assert_eq!(bp.r_function, "test_function");
        assert_eq!(bp.input_datasets.len(), 1);
        assert_eq!(bp.input_datasets[0].param_type, "TABULAR");

        let p = &bp.parameters[0];
        assert_eq!(p.display_name, "Neighbors");
        assert_eq!(p.param_min, Some(serde_json::json!(1)));
        assert_eq!(p.param_group.as_deref(), Some("Advanced"));
        assert!(p.optional);

        assert!(bp.columns[0].is_multi);
        assert_eq!(bp.outputs["result"].kind, "file");
        assert_eq!(bp.ordered_mustache_keys, vec!["input_file", "n_neighbors"]);
    }

    #[test]
    fn test_output_order_preserved() {
        let bp = Blueprint::from_json_str(
            r#"{"outputs": {
                "zeta": {"type": "file", "name": "z.csv"},
                "alpha": {"type": "directory", "name": "figures/"}
            }}"#,
        )
        .unwrap();
        let names: Vec<&String> = bp.outputs.keys().collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_not_a_record_is_an_error() {
        assert!(Blueprint::from_json_str("{ invalid json }").is_err());
    }
}
