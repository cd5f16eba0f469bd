//! Shared plumbing for the Benchwright binaries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;
