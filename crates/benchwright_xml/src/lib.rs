//! Benchwright XML Tree
//!
//! A small, ordered XML element tree plus a deterministic renderer. Element
//! and attribute order are preserved exactly as built, because top-level
//! section order in a tool definition is part of the external contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod element;
pub mod escape;
pub mod render;

// Re-exports
pub use element::Element;
pub use escape::{escape_attr, escape_text};
pub use render::render;
