//! Populating Terraform state with `terraform import`.
//!
//! The exporters describe what to import as [`ImportTarget`]s and hand them to
//! a [`StateImporter`]. [`TerraformImporter`] is the implementation that shells
//! out to the terraform binary; tests substitute their own.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::errors::Error;
use crate::names::ResourceAddress;

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;

/// A resource address paired with the identifier GitHub knows it by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportTarget {
    address: ResourceAddress,
    id: String,
}

impl ImportTarget {
    pub fn new(address: ResourceAddress, id: impl Into<String>) -> Self {
        Self {
            address,
            id: id.into(),
        }
    }

    pub fn address(&self) -> &ResourceAddress {
        &self.address
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Binds existing remote resources to Terraform addresses, one at a time.
#[async_trait]
pub trait StateImporter: Send + Sync {
    /// Imports a single resource.
    ///
    /// # Errors
    ///
    /// Returns `Error::ImportSpawn` if the import could not be started and
    /// `Error::ImportFailed` if it was rejected.
    async fn import(&self, target: &ImportTarget) -> Result<(), Error>;
}

/// Where and how the terraform binary is run.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerraformSettings {
    /// Binary name or path
    pub binary: String,
    /// Directory holding the Terraform configuration
    pub working_dir: PathBuf,
    /// Passed as `-var-file`
    pub var_file: String,
}

impl Default for TerraformSettings {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
            working_dir: PathBuf::from(".."),
            var_file: "local.tfvars".to_string(),
        }
    }
}

/// Runs `terraform import` for each target.
#[derive(Clone, Debug)]
pub struct TerraformImporter {
    settings: TerraformSettings,
    extra_args: Vec<String>,
}

impl TerraformImporter {
    pub fn new(settings: TerraformSettings) -> Self {
        Self {
            settings,
            extra_args: Vec::new(),
        }
    }

    /// Adds flags placed after `-var-file` and before the address.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn settings(&self) -> &TerraformSettings {
        &self.settings
    }

    /// The arguments passed to the binary for `target`.
    pub fn command_args(&self, target: &ImportTarget) -> Vec<String> {
        let mut args = vec![
            "import".to_string(),
            "-var-file".to_string(),
            self.settings.var_file.clone(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args.push(target.address.to_string());
        args.push(target.id.clone());
        args
    }
}

#[async_trait]
impl StateImporter for TerraformImporter {
    #[instrument(skip(self, target), fields(address = %target.address, id = %target.id))]
    async fn import(&self, target: &ImportTarget) -> Result<(), Error> {
        let args = self.command_args(target);
        debug!(
            binary = %self.settings.binary,
            working_dir = %self.settings.working_dir.display(),
            args = ?args,
            "Running import"
        );

        let output = Command::new(&self.settings.binary)
            .args(&args)
            .current_dir(&self.settings.working_dir)
            .output()
            .await
            .map_err(|source| Error::ImportSpawn {
                address: target.address.clone(),
                binary: self.settings.binary.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(stdout = %stdout.trim(), "Import output");
        }

        if !output.status.success() {
            return Err(Error::ImportFailed {
                address: target.address.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Imported resource");
        Ok(())
    }
}
