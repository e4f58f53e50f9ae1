//! Repository domain types.
//!
//! This module contains the identity fields of a GitHub repository as they are
//! needed to describe it as a Terraform resource.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Represents a GitHub repository.
///
/// Only the per-repository identity fields are kept. Organization-wide policy
/// (visibility, merge strategies, security toggles) is deliberately not read
/// from the API.
///
/// # Examples
///
/// ```rust
/// use github_client::Repository;
///
/// let repo = Repository::new(
///     "my-repo".to_string(),
///     Some("acme".to_string()),
///     Some("Tools for Acme".to_string()),
///     None,
/// );
///
/// assert_eq!(repo.name(), "my-repo");
/// assert_eq!(repo.owner(), Some("acme"));
/// assert_eq!(repo.homepage(), None);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Repository {
    /// The name of the repository
    name: String,
    /// The login of the owning user or organization
    #[serde(default)]
    owner: Option<String>,
    /// The free-text description
    #[serde(default)]
    description: Option<String>,
    /// The homepage URL, as entered by the repository admins
    #[serde(default)]
    homepage: Option<String>,
}

impl Repository {
    /// Creates a new Repository instance.
    pub fn new(
        name: String,
        owner: Option<String>,
        description: Option<String>,
        homepage: Option<String>,
    ) -> Self {
        Self {
            name,
            owner,
            description,
            homepage,
        }
    }

    /// Returns the description, if one is set and non-empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Returns the homepage URL, if one is set and non-empty.
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.is_empty())
    }

    /// Returns the name of the repository (without owner).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owner login reported by GitHub.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

impl From<octocrab::models::Repository> for Repository {
    fn from(value: octocrab::models::Repository) -> Self {
        Self {
            name: value.name,
            owner: value.owner.map(|o| o.login),
            description: value.description,
            homepage: value.homepage,
        }
    }
}
