//! Error types for exporting organization data as Terraform.
//!
//! Every variant ends the run. Validation errors are the one exception the
//! caller can opt out of, by choosing [`ViolationPolicy::Skip`](crate::ViolationPolicy::Skip).

use crate::names::ResourceAddress;
use crate::validation::ValidationReport;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while planning, rendering or importing resources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A branch protection rule uses settings the provider cannot express.
    #[error("Branch protection rule {address} cannot be exported: {report}")]
    Validation {
        address: ResourceAddress,
        report: ValidationReport,
    },

    /// GitHub returned only part of a repository's branch protection rules.
    #[error("Branch protection rules of {owner}/{repository} are incomplete: GitHub returned only the first page")]
    IncompleteRuleList { owner: String, repository: String },

    /// Two resources sanitize to the same Terraform address.
    #[error("More than one resource maps to the address {address}")]
    ResourceNameCollision { address: ResourceAddress },

    /// The import tool could not be started.
    #[error("Failed to run '{binary}' to import {address}: {source}")]
    ImportSpawn {
        address: ResourceAddress,
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The import tool ran but reported failure.
    #[error("Import of {address} failed with {status}: {stderr}")]
    ImportFailed {
        address: ResourceAddress,
        status: String,
        stderr: String,
    },

    /// Writing rendered output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
