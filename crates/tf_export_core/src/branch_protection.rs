//! Branch protection rules as Terraform `github_branch_protection` resources.
//!
//! A GraphQL [`BranchProtectionRule`] is first flattened into a
//! [`BranchProtectionRecord`]. Only a successfully validated record, a
//! [`ValidatedRule`], can be rendered or imported, so unsupported settings never
//! reach the output.

use github_client::{Actor, ActorAllowance, BranchProtectionRule, Connection};

use crate::actors::resolve_actor;
use crate::hcl::{Block, Expression};
use crate::import::ImportTarget;
use crate::names::{repository_resource_name, ResourceAddress, BRANCH_PROTECTION_RESOURCE_TYPE};
use crate::validation::{AllowanceList, ValidationReport, ValidationRules, Violation};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// Extra `terraform import` flags used for branch protections.
pub const BRANCH_PROTECTION_IMPORT_ARGS: &[&str] = &["-input=false", "-lock=false"];

/// One branch protection rule on one repository, flattened.
///
/// `lock_branch`, `lock_allows_fetch_and_merge` and `require_last_push_approval`
/// have no counterpart in the provider resource. They are kept only so
/// [`BranchProtectionRecord::validate`] can refuse rules that enable them.
/// Likewise `truncated_allowances` names the actor lists GitHub did not return
/// in full, since exporting a partial list would drop actors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchProtectionRecord {
    pub owner: String,
    pub repository: String,
    pub pattern: String,

    pub allows_deletions: bool,
    pub allows_force_pushes: bool,
    pub blocks_creations: bool,
    pub bypass_force_push_allowances: Vec<Option<Actor>>,
    pub bypass_pull_request_allowances: Vec<Option<Actor>>,
    pub dismisses_stale_reviews: bool,
    pub is_admin_enforced: bool,
    pub lock_allows_fetch_and_merge: bool,
    pub lock_branch: bool,
    pub require_last_push_approval: bool,
    pub required_approving_review_count: u32,
    pub required_status_check_contexts: Vec<String>,
    pub requires_approving_reviews: bool,
    pub requires_code_owner_reviews: bool,
    pub requires_commit_signatures: bool,
    pub requires_conversation_resolution: bool,
    pub requires_linear_history: bool,
    pub requires_status_checks: bool,
    pub requires_strict_status_checks: bool,
    pub restricts_pushes: bool,
    pub restricts_review_dismissals: bool,
    pub review_dismissal_allowances: Vec<Option<Actor>>,
    pub truncated_allowances: Vec<AllowanceList>,
}

fn actors(allowances: &Connection<ActorAllowance>) -> Vec<Option<Actor>> {
    allowances.nodes.iter().map(|a| a.actor.clone()).collect()
}

fn truncated_lists(rule: &BranchProtectionRule) -> Vec<AllowanceList> {
    [
        (AllowanceList::BypassForcePush, &rule.bypass_force_push_allowances),
        (AllowanceList::BypassPullRequest, &rule.bypass_pull_request_allowances),
        (AllowanceList::ReviewDismissal, &rule.review_dismissal_allowances),
    ]
    .into_iter()
    .filter(|(_, allowances)| allowances.is_truncated())
    .map(|(list, _)| list)
    .collect()
}

impl BranchProtectionRecord {
    /// Flattens a rule fetched for `repository` owned by `owner`.
    pub fn from_rule(owner: &str, repository: &str, rule: &BranchProtectionRule) -> Self {
        Self {
            owner: owner.to_string(),
            repository: repository.to_string(),
            pattern: rule.pattern.clone(),
            allows_deletions: rule.allows_deletions,
            allows_force_pushes: rule.allows_force_pushes,
            blocks_creations: rule.blocks_creations,
            bypass_force_push_allowances: actors(&rule.bypass_force_push_allowances),
            bypass_pull_request_allowances: actors(&rule.bypass_pull_request_allowances),
            dismisses_stale_reviews: rule.dismisses_stale_reviews,
            is_admin_enforced: rule.is_admin_enforced,
            lock_allows_fetch_and_merge: rule.lock_allows_fetch_and_merge,
            lock_branch: rule.lock_branch,
            require_last_push_approval: rule.require_last_push_approval,
            required_approving_review_count: rule.required_approving_review_count.unwrap_or(0),
            required_status_check_contexts: rule
                .required_status_check_contexts
                .clone()
                .unwrap_or_default(),
            requires_approving_reviews: rule.requires_approving_reviews,
            requires_code_owner_reviews: rule.requires_code_owner_reviews,
            requires_commit_signatures: rule.requires_commit_signatures,
            requires_conversation_resolution: rule.requires_conversation_resolution,
            requires_linear_history: rule.requires_linear_history,
            requires_status_checks: rule.requires_status_checks,
            requires_strict_status_checks: rule.requires_strict_status_checks,
            restricts_pushes: rule.restricts_pushes,
            restricts_review_dismissals: rule.restricts_review_dismissals,
            review_dismissal_allowances: actors(&rule.review_dismissal_allowances),
            truncated_allowances: truncated_lists(rule),
        }
    }

    /// The Terraform address this rule is exported under.
    pub fn address(&self) -> ResourceAddress {
        ResourceAddress::branch_protection(&self.owner, &self.repository, &self.pattern)
    }

    /// Checks the record against `rules`, resolving every actor on the way.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] listing every violation when any
    /// unsupported setting is enabled, an actor list is incomplete, or any
    /// actor cannot be resolved.
    pub fn validate(&self, rules: &ValidationRules) -> Result<ValidatedRule, ValidationReport> {
        let mut violations = Vec::new();

        if self.lock_branch {
            violations.push(Violation::LockBranch);
        }
        if self.lock_allows_fetch_and_merge {
            violations.push(Violation::LockAllowsFetchAndMerge);
        }
        if rules.reject_last_push_approval && self.require_last_push_approval {
            violations.push(Violation::RequireLastPushApproval);
        }
        violations.extend(
            self.truncated_allowances
                .iter()
                .map(|&list| Violation::Truncated { list }),
        );

        let push_restrictions = resolve_list(
            AllowanceList::BypassForcePush,
            &self.bypass_force_push_allowances,
            &mut violations,
        );
        let pull_request_bypassers = resolve_list(
            AllowanceList::BypassPullRequest,
            &self.bypass_pull_request_allowances,
            &mut violations,
        );
        let dismissal_restrictions = resolve_list(
            AllowanceList::ReviewDismissal,
            &self.review_dismissal_allowances,
            &mut violations,
        );

        if !violations.is_empty() {
            return Err(ValidationReport::new(violations));
        }

        Ok(ValidatedRule {
            address: self.address(),
            record: self.clone(),
            push_restrictions,
            pull_request_bypassers,
            dismissal_restrictions,
        })
    }
}

fn resolve_list(
    list: AllowanceList,
    actors: &[Option<Actor>],
    violations: &mut Vec<Violation>,
) -> Vec<String> {
    let mut resolved = Vec::with_capacity(actors.len());
    for actor in actors {
        match resolve_actor(actor.as_ref()) {
            Ok(id) => resolved.push(id),
            Err(reason) => violations.push(Violation::UnsupportedActor { list, reason }),
        }
    }
    resolved
}

/// A record that passed validation, with its actor lists resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRule {
    address: ResourceAddress,
    record: BranchProtectionRecord,
    push_restrictions: Vec<String>,
    pull_request_bypassers: Vec<String>,
    dismissal_restrictions: Vec<String>,
}

impl ValidatedRule {
    pub fn address(&self) -> &ResourceAddress {
        &self.address
    }

    pub fn record(&self) -> &BranchProtectionRecord {
        &self.record
    }

    /// Renders the `github_branch_protection` resource block.
    ///
    /// The `required_status_checks` block is only emitted when the rule
    /// requires status checks.
    pub fn to_block(&self) -> Block {
        let r = &self.record;
        let repository_resource = repository_resource_name(&r.owner, &r.repository);

        let mut block = Block::new("resource")
            .with_label(BRANCH_PROTECTION_RESOURCE_TYPE)
            .with_label(self.address.name())
            .attribute("provider", Expression::traversal(["github", r.owner.as_str()]))
            .attribute(
                "repository_id",
                Expression::traversal([
                    "github_repository",
                    repository_resource.as_str(),
                    "node_id",
                ]),
            )
            .blank_line()
            .attribute("pattern", r.pattern.as_str())
            .blank_line()
            .attribute("enforce_admins", r.is_admin_enforced)
            .attribute("require_signed_commits", r.requires_commit_signatures)
            .attribute("required_linear_history", r.requires_linear_history)
            .attribute(
                "require_conversation_resolution",
                r.requires_conversation_resolution,
            )
            .attribute(
                "push_restrictions",
                Expression::string_list(self.push_restrictions.iter().cloned()),
            )
            .attribute("allows_deletions", r.allows_deletions)
            .attribute("allows_force_pushes", r.allows_force_pushes)
            .attribute("blocks_creations", r.blocks_creations);

        if r.requires_status_checks {
            block = block.blank_line().block(
                Block::new("required_status_checks")
                    .attribute("strict", r.requires_strict_status_checks)
                    .attribute(
                        "contexts",
                        Expression::string_list(r.required_status_check_contexts.iter().cloned()),
                    ),
            );
        }

        block.blank_line().block(
            Block::new("required_pull_request_reviews")
                .attribute("dismiss_stale_reviews", r.dismisses_stale_reviews)
                .attribute("restrict_dismissals", r.restricts_review_dismissals)
                .attribute(
                    "dismissal_restrictions",
                    Expression::string_list(self.dismissal_restrictions.iter().cloned()),
                )
                .attribute(
                    "pull_request_bypassers",
                    Expression::string_list(self.pull_request_bypassers.iter().cloned()),
                )
                .attribute("require_code_owner_reviews", r.requires_code_owner_reviews)
                .attribute(
                    "required_approving_review_count",
                    r.required_approving_review_count,
                ),
        )
    }

    /// The `terraform import` target: this address, identified by
    /// `<repository>:<pattern>`.
    pub fn import_target(&self) -> ImportTarget {
        ImportTarget::new(
            self.address.clone(),
            format!("{}:{}", self.record.repository, self.record.pattern),
        )
    }
}
