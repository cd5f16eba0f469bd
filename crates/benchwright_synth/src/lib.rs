//! Benchwright Tool-Definition Synthesizer
//!
//! Turns a declarative blueprint into a workflow-platform tool definition:
//! widgets, command invocation, and output declarations. The command text it
//! emits threads the classifier's decisions through to the runtime
//! normalizer, so both sides share the constants in
//! [`benchwright_core::contract`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod pipeline;
pub mod synthesizer;
pub mod text;

// Re-exports
pub use config::SynthConfig;
pub use pipeline::{BatchSummary, SynthError, batch_process, process_blueprint};
pub use synthesizer::Synthesizer;
