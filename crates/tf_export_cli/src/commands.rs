//! Command implementations for the exporters.
//!
//! Each binary parses its own arguments and hands them to one submodule:
//!
//! - `branch_protections_cmd`: render or import branch protection rules
//! - `repositories_cmd`: render repositories
//! - `import_cmd`: import repositories into Terraform state
//!
//! The `execute` function of each submodule takes its collaborators as trait
//! objects and writes to any `io::Write`, so it runs unchanged against fakes.

use std::path::{Path, PathBuf};

use clap::Args;
use github_client::{create_token_client, GitHubClient};
use tracing::{debug, instrument};

use crate::config::{load_token, AppConfig};
use crate::errors::Error;

pub mod branch_protections_cmd;
pub mod import_cmd;
pub mod repositories_cmd;

#[cfg(test)]
pub(crate) mod fakes;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Options accepted by every exporter.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonArgs {
    /// Configuration file. Defaults to tf-export.toml when it exists.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// File holding the GitHub token, overriding `token_file` from the
    /// configuration.
    #[arg(long)]
    pub token_file: Option<PathBuf>,
}

/// Rejects organization logins that cannot name an organization.
pub fn check_org(org: &str) -> Result<(), Error> {
    if org.trim().is_empty() {
        return Err(Error::InvalidArguments(
            "the organization login must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Reads the token and builds a GitHub client from `config`.
///
/// `token_file` takes precedence over the file named in the configuration.
#[instrument(skip(config))]
pub fn connect(config: &AppConfig, token_file: Option<&Path>) -> Result<GitHubClient, Error> {
    let path = token_file.unwrap_or(config.token_file.as_path());
    debug!("Reading GitHub token from {:?}", path);

    let token = load_token(path)?;
    let octocrab = create_token_client(&token, config.api_base_url.as_deref())?;
    Ok(GitHubClient::new(octocrab))
}

/// Keeps failures to write standard output apart from other export errors.
pub(crate) fn output_error(e: tf_export_core::Error) -> Error {
    match e {
        tf_export_core::Error::Io(io) => Error::Output(io),
        other => Error::Export(other),
    }
}
