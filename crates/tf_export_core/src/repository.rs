//! Repositories as Terraform `github_repository` resources.
//!
//! Only the identity of a repository (name, description and homepage) is taken
//! from GitHub. Every other setting comes from a single organization-wide
//! [`RepositoryPolicy`], either referenced as a Terraform local or written out
//! inline, depending on the [`PolicySource`].

use github_client::Repository;
use serde::{Deserialize, Serialize};

use crate::hcl::{Block, Expression};
use crate::import::ImportTarget;
use crate::names::{ResourceAddress, REPOSITORY_RESOURCE_TYPE};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Name of the Terraform local the policy is read from by default.
pub const DEFAULT_POLICY_LOCAL: &str = "github_policy";

/// Settings that only apply when a repository is created.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreationPolicy {
    pub auto_init: bool,
    pub gitignore_template: Option<String>,
    pub license_template: Option<String>,
}

/// `enabled` or `disabled` status of each security feature.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SecurityAndAnalysisPolicy {
    pub advanced_security: String,
    pub secret_scanning: String,
    pub secret_scanning_push_protection: String,
}

impl Default for SecurityAndAnalysisPolicy {
    fn default() -> Self {
        Self {
            advanced_security: "disabled".to_string(),
            secret_scanning: "enabled".to_string(),
            secret_scanning_push_protection: "enabled".to_string(),
        }
    }
}

/// Organization-wide repository settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RepositoryPolicy {
    pub archive_on_destroy: bool,
    pub visibility: String,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub has_downloads: bool,
    pub allow_merge_commit: bool,
    pub allow_squash_merge: bool,
    pub allow_rebase_merge: bool,
    pub allow_auto_merge: bool,
    pub squash_merge_commit_title: String,
    pub squash_merge_commit_message: String,
    pub merge_commit_title: String,
    pub merge_commit_message: String,
    pub delete_branch_on_merge: bool,
    pub allow_update_branch: bool,
    pub creation: CreationPolicy,
    pub security_and_analysis: SecurityAndAnalysisPolicy,
    pub topics: Vec<String>,
    pub vulnerability_alerts: bool,
    pub ignore_vulnerability_alerts_during_read: bool,
}

impl Default for RepositoryPolicy {
    fn default() -> Self {
        Self {
            archive_on_destroy: true,
            visibility: "private".to_string(),
            has_issues: true,
            has_projects: false,
            has_wiki: false,
            has_downloads: false,
            allow_merge_commit: false,
            allow_squash_merge: true,
            allow_rebase_merge: false,
            allow_auto_merge: false,
            squash_merge_commit_title: "PR_TITLE".to_string(),
            squash_merge_commit_message: "COMMIT_MESSAGES".to_string(),
            merge_commit_title: "MERGE_MESSAGE".to_string(),
            merge_commit_message: "PR_TITLE".to_string(),
            delete_branch_on_merge: true,
            allow_update_branch: true,
            creation: CreationPolicy::default(),
            security_and_analysis: SecurityAndAnalysisPolicy::default(),
            topics: Vec::new(),
            vulnerability_alerts: true,
            ignore_vulnerability_alerts_during_read: false,
        }
    }
}

/// Where the policy attributes of a repository block come from.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PolicySource {
    /// Every attribute is a traversal into `local.<local_name>`.
    Reference {
        #[serde(default = "default_local_name")]
        local_name: String,
    },
    /// Every attribute is written as a literal value.
    Inline {
        #[serde(default)]
        values: RepositoryPolicy,
    },
}

fn default_local_name() -> String {
    DEFAULT_POLICY_LOCAL.to_string()
}

impl Default for PolicySource {
    fn default() -> Self {
        PolicySource::Reference {
            local_name: default_local_name(),
        }
    }
}

impl PolicySource {
    /// The expression for the policy attribute at `path`.
    ///
    /// `select` picks the literal value and is only called for inline policies.
    fn expression<F>(&self, path: &[&str], select: F) -> Expression
    where
        F: FnOnce(&RepositoryPolicy) -> Expression,
    {
        match self {
            PolicySource::Reference { local_name } => Expression::traversal(
                ["local", local_name.as_str()]
                    .into_iter()
                    .chain(path.iter().copied()),
            ),
            PolicySource::Inline { values } => select(values),
        }
    }
}

/// A repository of an organization, ready to be rendered or imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryResource {
    owner: String,
    repository: Repository,
}

impl RepositoryResource {
    /// Pairs `repository` with its owner login.
    ///
    /// The login reported by GitHub wins over `default_owner`, which is only
    /// used when the listing did not include one.
    pub fn new(default_owner: &str, repository: Repository) -> Self {
        let owner = repository.owner().unwrap_or(default_owner).to_string();
        Self { owner, repository }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn address(&self) -> ResourceAddress {
        ResourceAddress::repository(&self.owner, self.repository.name())
    }

    /// Renders the `github_repository` resource block.
    pub fn to_block(&self, policy: &PolicySource) -> Block {
        let address = self.address();
        let repo = &self.repository;

        Block::new("resource")
            .with_label(REPOSITORY_RESOURCE_TYPE)
            .with_label(address.name())
            .attribute(
                "provider",
                Expression::traversal(["github", self.owner.as_str()]),
            )
            .blank_line()
            .block(Block::new("lifecycle").attribute("prevent_destroy", true))
            .attribute(
                "archive_on_destroy",
                policy.expression(&["archive_on_destroy"], |p| p.archive_on_destroy.into()),
            )
            .blank_line()
            .attribute("name", repo.name())
            .attribute("description", repo.description().unwrap_or_default())
            .attribute("homepage_url", repo.homepage().unwrap_or_default())
            .blank_line()
            .attribute(
                "visibility",
                policy.expression(&["visibility"], |p| p.visibility.as_str().into()),
            )
            .attribute(
                "has_issues",
                policy.expression(&["has_issues"], |p| p.has_issues.into()),
            )
            .attribute(
                "has_projects",
                policy.expression(&["has_projects"], |p| p.has_projects.into()),
            )
            .attribute(
                "has_wiki",
                policy.expression(&["has_wiki"], |p| p.has_wiki.into()),
            )
            .attribute(
                "has_downloads",
                policy.expression(&["has_downloads"], |p| p.has_downloads.into()),
            )
            .blank_line()
            .attribute(
                "allow_merge_commit",
                policy.expression(&["allow_merge_commit"], |p| p.allow_merge_commit.into()),
            )
            .attribute(
                "allow_squash_merge",
                policy.expression(&["allow_squash_merge"], |p| p.allow_squash_merge.into()),
            )
            .attribute(
                "allow_rebase_merge",
                policy.expression(&["allow_rebase_merge"], |p| p.allow_rebase_merge.into()),
            )
            .attribute(
                "allow_auto_merge",
                policy.expression(&["allow_auto_merge"], |p| p.allow_auto_merge.into()),
            )
            .blank_line()
            .attribute(
                "squash_merge_commit_title",
                policy.expression(&["squash_merge_commit_title"], |p| {
                    p.squash_merge_commit_title.as_str().into()
                }),
            )
            .attribute(
                "squash_merge_commit_message",
                policy.expression(&["squash_merge_commit_message"], |p| {
                    p.squash_merge_commit_message.as_str().into()
                }),
            )
            .attribute(
                "merge_commit_title",
                policy.expression(&["merge_commit_title"], |p| {
                    p.merge_commit_title.as_str().into()
                }),
            )
            .attribute(
                "merge_commit_message",
                policy.expression(&["merge_commit_message"], |p| {
                    p.merge_commit_message.as_str().into()
                }),
            )
            .blank_line()
            .attribute(
                "delete_branch_on_merge",
                policy.expression(&["delete_branch_on_merge"], |p| {
                    p.delete_branch_on_merge.into()
                }),
            )
            .attribute(
                "allow_update_branch",
                policy.expression(&["allow_update_branch"], |p| p.allow_update_branch.into()),
            )
            .blank_line()
            .attribute(
                "auto_init",
                policy.expression(&["creation", "auto_init"], |p| p.creation.auto_init.into()),
            )
            .attribute(
                "gitignore_template",
                policy.expression(&["creation", "gitignore_template"], |p| {
                    p.creation.gitignore_template.clone().into()
                }),
            )
            .attribute(
                "license_template",
                policy.expression(&["creation", "license_template"], |p| {
                    p.creation.license_template.clone().into()
                }),
            )
            .blank_line()
            .block(
                Block::new("security_and_analysis")
                    .block(security_block(policy, "advanced_security", |s| {
                        s.advanced_security.as_str()
                    }))
                    .block(security_block(policy, "secret_scanning", |s| {
                        s.secret_scanning.as_str()
                    }))
                    .block(security_block(
                        policy,
                        "secret_scanning_push_protection",
                        |s| s.secret_scanning_push_protection.as_str(),
                    )),
            )
            .blank_line()
            .attribute(
                "topics",
                policy.expression(&["topics"], |p| {
                    Expression::string_list(p.topics.iter().cloned())
                }),
            )
            .blank_line()
            .attribute(
                "vulnerability_alerts",
                policy.expression(&["vulnerability_alerts"], |p| p.vulnerability_alerts.into()),
            )
            .attribute(
                "ignore_vulnerability_alerts_during_read",
                policy.expression(&["ignore_vulnerability_alerts_during_read"], |p| {
                    p.ignore_vulnerability_alerts_during_read.into()
                }),
            )
    }

    /// The `terraform import` target: this address, identified by the
    /// repository name.
    pub fn import_target(&self) -> ImportTarget {
        ImportTarget::new(self.address(), self.repository.name())
    }
}

fn security_block(
    policy: &PolicySource,
    feature: &str,
    select: fn(&SecurityAndAnalysisPolicy) -> &str,
) -> Block {
    Block::new(feature).attribute(
        "status",
        policy.expression(&["security_and_analysis", feature], |p| {
            select(&p.security_and_analysis).into()
        }),
    )
}
