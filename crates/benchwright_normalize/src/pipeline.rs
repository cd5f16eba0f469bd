//! Full normalization pipeline, in-memory and file-backed.

use std::fs;
use std::path::{Path, PathBuf};

use benchwright_core::contract;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::record::{flatten_params, inject_outputs, process_params, prune_empty};

/// Normalization pipeline error
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Source record could not be read
    #[error("failed to read parameter record {}: {source}", path.display())]
    Read {
        /// Source path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Source text is not valid JSON
    #[error("failed to parse parameter record {}: {source}", path.display())]
    Parse {
        /// Source path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
    /// Source parsed but is not a JSON record
    #[error("parameter record {} is not a JSON object", path.display())]
    NotAnObject {
        /// Source path
        path: PathBuf,
    },
    /// Cleaned record could not be written
    #[error("failed to write cleaned record {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Options steering one normalization run. The key sets mirror the flags the
/// synthesizer placed in the tool's command text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Keys to boolean-coerce
    pub bool_keys: Vec<String>,
    /// Keys to list-process (bare names, never `_repeat`)
    pub list_keys: Vec<String>,
    /// Per-key separators for list keys parsed as delimited text
    pub delimited: IndexMap<String, String>,
    /// Outputs configuration to merge into the cleaned record
    pub outputs: Option<Map<String, Value>>,
    /// Whether to merge the outputs configuration
    pub inject_outputs: bool,
}

/// Normalize a raw parameter record into the cleaned record the wrapped
/// function expects.
///
/// Steps, in order: boolean/list processing, one-level flattening with
/// `_repeat` filtering, result-object injection, optional outputs injection,
/// and empty-value pruning. Processing runs before flattening because
/// flattening unconditionally drops every `_repeat` key, including the
/// containers list extraction reads from.
#[must_use]
pub fn normalize_record(raw: &Map<String, Value>, opts: &NormalizeOptions) -> Map<String, Value> {
    let processed = process_params(raw, &opts.bool_keys, &opts.list_keys, &opts.delimited);
    let mut cleaned = flatten_params(&processed);
    cleaned.insert(
        contract::RESULT_OBJECT_KEY.to_string(),
        Value::String(contract::RESULT_OBJECT_FILE.to_string()),
    );
    if opts.inject_outputs {
        inject_outputs(&mut cleaned, opts.outputs.as_ref());
    }
    prune_empty(&mut cleaned);
    cleaned
}

/// Normalize a JSON parameter record from `src` and write the cleaned record
/// to `dst` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`NormalizeError`] when `src` is unreadable, fails to parse, or
/// is not a JSON object, or when `dst` cannot be written. No partial output
/// is ever written.
pub fn normalize_file(
    src: &Path,
    dst: &Path,
    opts: &NormalizeOptions,
) -> Result<(), NormalizeError> {
    let text = fs::read_to_string(src).map_err(|source| NormalizeError::Read {
        path: src.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| NormalizeError::Parse {
        path: src.to_path_buf(),
        source,
    })?;
    let Some(raw) = value.as_object() else {
        return Err(NormalizeError::NotAnObject {
            path: src.to_path_buf(),
        });
    };

    let cleaned = normalize_record(raw, opts);
    debug!(
        src = %src.display(),
        dst = %dst.display(),
        keys = cleaned.len(),
        "normalized parameter record"
    );

    let mut rendered = serde_json::to_string_pretty(&Value::Object(cleaned)).map_err(|source| {
        NormalizeError::Parse {
            path: dst.to_path_buf(),
            source,
        }
    })?;
    rendered.push('\n');
    fs::write(dst, rendered).map_err(|source| NormalizeError::Write {
        path: dst.to_path_buf(),
        source,
    })
}
