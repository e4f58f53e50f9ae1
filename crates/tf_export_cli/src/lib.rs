//! Library behind the `export-branch-protections`, `export-repositories` and
//! `import-repositories` binaries.
//!
//! The binaries only parse arguments, install logging and map errors to the
//! exit code; everything else lives here so it can be tested.

pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
