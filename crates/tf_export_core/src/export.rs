//! Turning fetched organization data into resources, then emitting them.
//!
//! Planning validates every item and guards against two items claiming the same
//! Terraform address. Emitting either writes the rendered blocks or runs one
//! import per resource, strictly in order.

use std::collections::BTreeSet;
use std::io;

use github_client::{Repository, RepositoryBranchProtections};
use tracing::{info, instrument, warn};

use crate::branch_protection::{BranchProtectionRecord, ValidatedRule};
use crate::errors::Error;
use crate::hcl::Block;
use crate::import::{ImportTarget, StateImporter};
use crate::names::ResourceAddress;
use crate::repository::RepositoryResource;
use crate::validation::{ValidationRules, ViolationPolicy};

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;

/// The branch protection rules of an organization that can be exported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchProtectionPlan {
    pub rules: Vec<ValidatedRule>,
    /// Rules left out under [`ViolationPolicy::Skip`]
    pub skipped: usize,
}

/// Tracks every address handed out in one run.
#[derive(Default)]
struct AddressRegistry {
    seen: BTreeSet<ResourceAddress>,
}

impl AddressRegistry {
    fn claim(&mut self, address: &ResourceAddress) -> Result<(), Error> {
        if self.seen.insert(address.clone()) {
            Ok(())
        } else {
            Err(Error::ResourceNameCollision {
                address: address.clone(),
            })
        }
    }
}

/// Validates every branch protection rule of `owner`'s repositories.
///
/// # Errors
///
/// Returns `Error::Validation` for the first invalid rule when the policy is
/// [`ViolationPolicy::Abort`], and `Error::ResourceNameCollision` when two
/// rules sanitize to the same address. A repository whose rule list is
/// incomplete fails with `Error::IncompleteRuleList` under either policy.
#[instrument(skip(repositories, rules), fields(repositories = repositories.len()))]
pub fn plan_branch_protections(
    owner: &str,
    repositories: &[RepositoryBranchProtections],
    rules: &ValidationRules,
) -> Result<BranchProtectionPlan, Error> {
    let mut plan = BranchProtectionPlan::default();
    let mut registry = AddressRegistry::default();

    for repository in repositories {
        if repository.branch_protection_rules.is_truncated() {
            return Err(Error::IncompleteRuleList {
                owner: owner.to_string(),
                repository: repository.name.clone(),
            });
        }
        for rule in &repository.branch_protection_rules.nodes {
            let record = BranchProtectionRecord::from_rule(owner, &repository.name, rule);
            match record.validate(rules) {
                Ok(validated) => {
                    registry.claim(validated.address())?;
                    plan.rules.push(validated);
                }
                Err(report) => match rules.on_violation {
                    ViolationPolicy::Abort => {
                        return Err(Error::Validation {
                            address: record.address(),
                            report,
                        })
                    }
                    ViolationPolicy::Skip => {
                        warn!(
                            address = %record.address(),
                            violations = %report,
                            "Skipping branch protection rule"
                        );
                        plan.skipped += 1;
                    }
                },
            }
        }
    }

    info!(
        rules = plan.rules.len(),
        skipped = plan.skipped,
        "Planned branch protections"
    );
    Ok(plan)
}

/// Pairs each repository with `owner`, refusing address collisions.
///
/// # Errors
///
/// Returns `Error::ResourceNameCollision` when two repository names sanitize
/// to the same address, such as `my.repo` and `my_repo`.
pub fn plan_repositories(
    owner: &str,
    repositories: Vec<Repository>,
) -> Result<Vec<RepositoryResource>, Error> {
    let mut registry = AddressRegistry::default();
    let mut resources = Vec::with_capacity(repositories.len());
    for repository in repositories {
        let resource = RepositoryResource::new(owner, repository);
        registry.claim(&resource.address())?;
        resources.push(resource);
    }
    Ok(resources)
}

/// Writes each block preceded by an empty line.
pub fn write_blocks<W, I>(out: &mut W, blocks: I) -> Result<(), Error>
where
    W: io::Write,
    I: IntoIterator<Item = Block>,
{
    for block in blocks {
        writeln!(out)?;
        write!(out, "{}", block)?;
    }
    out.flush()?;
    Ok(())
}

/// Imports `targets` one after another, writing `Imported: <address>` to
/// `out` after each success. Stops at the first failure.
///
/// Returns the number of imported resources.
pub async fn import_targets<W: io::Write>(
    importer: &dyn StateImporter,
    targets: &[ImportTarget],
    out: &mut W,
) -> Result<usize, Error> {
    for target in targets {
        importer.import(target).await?;
        writeln!(out, "Imported: {}", target.address())?;
    }
    out.flush()?;
    Ok(targets.len())
}
