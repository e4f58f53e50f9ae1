use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can end a run of one of the exporters.
///
/// Each variant maps to exit code 1; the message is logged and printed to
/// standard error.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or checking configuration.
    ///
    /// Returned when an explicitly requested configuration file is missing or
    /// unreadable, or when a setting has an unusable value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The token file could not be read.
    #[error("Failed to read the GitHub token from {path:?}")]
    LoadToken {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The token file exists but holds nothing but whitespace.
    #[error("The GitHub token file {0:?} is empty")]
    EmptyToken(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("Failed to parse TOML configuration file: {0}")]
    ParseTomlFile(toml::de::Error),

    /// Reading from GitHub failed.
    #[error("GitHub request failed: {0}")]
    GitHub(#[from] github_client::Error),

    /// Validation, rendering or import of a resource failed.
    #[error(transparent)]
    Export(#[from] tf_export_core::Error),

    /// Writing to standard output failed.
    #[error("Failed to write output: {0}")]
    Output(io::Error),
}
