//! In-memory collaborators for command tests.

use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{
    BranchProtectionRule, Connection, Error as GitHubError, OrganizationClient,
    OwnerBranchProtections, Repository, RepositoryBranchProtections,
};
use tf_export_core::{Error as ExportError, ImportTarget, StateImporter};

pub(crate) fn repository(name: &str) -> Repository {
    Repository::new(name.to_string(), Some("acme".to_string()), None, None)
}

pub(crate) fn protected(name: &str, rules: Vec<BranchProtectionRule>) -> RepositoryBranchProtections {
    RepositoryBranchProtections {
        name: name.to_string(),
        branch_protection_rules: Connection::from_nodes(rules),
    }
}

/// Serves canned organization data and records which calls were made.
#[derive(Default)]
pub(crate) struct FakeOrganization {
    pub repositories: Vec<Repository>,
    pub first_page: Vec<Repository>,
    pub protections: Vec<RepositoryBranchProtections>,
    /// Login reported for branch protections; the requested name when unset
    pub login: Option<String>,
    pub missing: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeOrganization {
    fn record(&self, call: String) -> Result<(), GitHubError> {
        self.calls.lock().expect("lock").push(call);
        if self.missing {
            Err(GitHubError::NotFound)
        } else {
            Ok(())
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl OrganizationClient for FakeOrganization {
    async fn list_org_repositories(
        &self,
        org_name: &str,
        per_page: u8,
    ) -> Result<Vec<Repository>, GitHubError> {
        self.record(format!("list_org_repositories({org_name}, {per_page})"))?;
        Ok(self.repositories.clone())
    }

    async fn list_org_repositories_first_page(
        &self,
        org_name: &str,
    ) -> Result<Vec<Repository>, GitHubError> {
        self.record(format!("list_org_repositories_first_page({org_name})"))?;
        Ok(self.first_page.clone())
    }

    async fn list_branch_protections(
        &self,
        org_name: &str,
    ) -> Result<OwnerBranchProtections, GitHubError> {
        self.record(format!("list_branch_protections({org_name})"))?;
        Ok(OwnerBranchProtections {
            login: self.login.clone().unwrap_or_else(|| org_name.to_string()),
            repositories: self.protections.clone(),
        })
    }
}

/// Records every import and optionally rejects one id.
#[derive(Default)]
pub(crate) struct RecordingImporter {
    pub imported: Mutex<Vec<(String, String)>>,
    pub reject_id: Option<String>,
}

impl RecordingImporter {
    pub(crate) fn imported(&self) -> Vec<(String, String)> {
        self.imported.lock().expect("lock").clone()
    }
}

#[async_trait]
impl StateImporter for RecordingImporter {
    async fn import(&self, target: &ImportTarget) -> Result<(), ExportError> {
        if self.reject_id.as_deref() == Some(target.id()) {
            return Err(ExportError::ImportFailed {
                address: target.address().clone(),
                status: "exit status: 1".to_string(),
                stderr: "Error: resource already managed by Terraform".to_string(),
            });
        }
        self.imported
            .lock()
            .expect("lock")
            .push((target.address().to_string(), target.id().to_string()));
        Ok(())
    }
}
