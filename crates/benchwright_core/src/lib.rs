//! Benchwright Core Types
//!
//! This crate contains pure types and logic with no I/O: the blueprint data
//! model, the parameter-type classifier, and the wire contract shared by the
//! tool-definition synthesizer and the runtime parameter normalizer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blueprint;
pub mod classify;
pub mod contract;
pub mod error;

// Re-exports
pub use blueprint::{Blueprint, ColumnSpec, OutputSpec, ParamSpec};
pub use classify::{ParamClass, WidgetKind, classify};
pub use error::{CoreError, CoreResult};
