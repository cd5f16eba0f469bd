//! Benchwright Runtime Parameter Normalizer
//!
//! Transforms the raw parameter record a workflow platform submits at
//! execution time into the cleaned record the wrapped function expects:
//! boolean coercion, list extraction from repeat containers, delimited-text
//! parsing, one-level flattening, and empty-value pruning. The flag sets it
//! accepts mirror the classifier decisions the synthesizer threaded through
//! the tool's command text; both sides share
//! [`benchwright_core::contract`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pipeline;
pub mod record;

// Re-exports
pub use pipeline::{NormalizeError, NormalizeOptions, normalize_file, normalize_record};
pub use record::{
    extract_list, flatten_params, inject_outputs, normalize_boolean, parse_delimited,
    process_params, prune_empty, unescape_separator,
};
