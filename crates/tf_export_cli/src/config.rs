//! Configuration for the exporters.
//!
//! Settings are read from an optional TOML file. When no file is named on the
//! command line, `tf-export.toml` in the current directory is used if it
//! exists; otherwise the built-in defaults apply.
//!
//! ```toml
//! token_file = "gh_token"
//! page_size = 10
//!
//! [terraform]
//! working_dir = ".."
//! var_file = "local.tfvars"
//!
//! [validation]
//! on_violation = "skip"
//!
//! [policy]
//! mode = "reference"
//! local_name = "github_policy"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tf_export_core::{PolicySource, TerraformSettings, ValidationRules};
use tracing::{debug, info};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tf-export.toml";

/// Default file the GitHub token is read from
pub const DEFAULT_TOKEN_FILENAME: &str = "gh_token";

/// Number of repositories requested per page by default
pub const DEFAULT_PAGE_SIZE: u8 = 10;

/// Largest page size the GitHub REST API accepts
pub const MAX_PAGE_SIZE: u8 = 100;

fn default_token_file() -> PathBuf {
    PathBuf::from(DEFAULT_TOKEN_FILENAME)
}

fn default_page_size() -> u8 {
    DEFAULT_PAGE_SIZE
}

/// Settings shared by all three exporters.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    /// File holding the GitHub personal access token
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// GitHub API base URL, for GitHub Enterprise Server
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Repositories requested per page when listing repositories
    #[serde(default = "default_page_size")]
    pub page_size: u8,

    #[serde(default)]
    pub terraform: TerraformSettings,

    #[serde(default)]
    pub validation: ValidationRules,

    #[serde(default)]
    pub policy: PolicySource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            api_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            terraform: TerraformSettings::default(),
            validation: ValidationRules::default(),
            policy: PolicySource::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read or
    /// holds an unusable value, and `Error::ParseTomlFile` if it is not valid
    /// TOML for this structure.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content).map_err(Error::ParseTomlFile)?;
        config.check()?;

        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Loads the named file, or the default file if it exists, or falls back
    /// to the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, Error> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::load_or_default(Path::new(DEFAULT_CONFIG_FILENAME)),
        }
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<(), Error> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        Ok(())
    }
}

/// Reads a personal access token from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns `Error::LoadToken` if the file cannot be read and
/// `Error::EmptyToken` if it contains only whitespace.
pub fn load_token(path: &Path) -> Result<SecretString, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::LoadToken {
        path: path.to_path_buf(),
        source,
    })?;

    let token = content.trim();
    if token.is_empty() {
        return Err(Error::EmptyToken(path.to_path_buf()));
    }

    Ok(SecretString::from(token.to_string()))
}
