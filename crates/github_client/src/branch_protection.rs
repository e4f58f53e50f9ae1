//! Branch protection domain types.
//!
//! These types mirror the shape of the GitHub GraphQL `BranchProtectionRule`
//! object closely enough to be deserialized straight from a query response.
//! Allowance actors are resolved to a closed [`Actor`] enum by serde, keyed on
//! the `__typename` field, so callers match on variants instead of probing
//! for fields.

use serde::Deserialize;

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// A GraphQL connection reduced to its nodes and paging cursor.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The items on this page
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    /// Paging information, when requested by the query
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

impl<T> Connection<T> {
    /// Creates a connection holding a single, complete page of nodes.
    pub fn from_nodes(nodes: Vec<T>) -> Self {
        Self {
            nodes,
            page_info: None,
        }
    }

    /// Returns `true` if GitHub reported more nodes than were returned.
    pub fn is_truncated(&self) -> bool {
        self.page_info
            .as_ref()
            .map(|p| p.has_next_page)
            .unwrap_or(false)
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self::from_nodes(Vec::new())
    }
}

/// Cursor information for a GraphQL connection.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page exists after this one
    pub has_next_page: bool,
    /// Opaque cursor of the last node on this page
    pub end_cursor: Option<String>,
}

/// The organization a team belongs to.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ActorOrganization {
    /// The organization login
    pub login: String,
}

/// An identity that may be granted an allowance on a branch protection rule.
///
/// GitHub models this as a GraphQL union of `App`, `Team` and `User`. Any
/// other `__typename` GitHub might add later deserializes to
/// [`Actor::Unsupported`] rather than failing the whole response.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "__typename")]
pub enum Actor {
    /// A team, identified by name within its organization
    Team {
        name: String,
        organization: ActorOrganization,
    },
    /// An individual user account
    User { login: String },
    /// A GitHub App
    App { name: String },
    /// A union member this client does not know about
    #[serde(other)]
    Unsupported,
}

/// One entry of an allowance list.
///
/// The actor is `None` when GitHub can no longer resolve it, for instance
/// after the user or team was deleted.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ActorAllowance {
    pub actor: Option<Actor>,
}

impl ActorAllowance {
    pub fn new(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }
}

/// A branch protection rule as returned by the GraphQL API.
///
/// Fields GitHub omits fall back to their defaults, which keeps fixtures small.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct BranchProtectionRule {
    pub pattern: String,
    pub allows_deletions: bool,
    pub allows_force_pushes: bool,
    pub blocks_creations: bool,
    pub bypass_force_push_allowances: Connection<ActorAllowance>,
    pub bypass_pull_request_allowances: Connection<ActorAllowance>,
    pub dismisses_stale_reviews: bool,
    pub is_admin_enforced: bool,
    pub lock_allows_fetch_and_merge: bool,
    pub lock_branch: bool,
    pub require_last_push_approval: bool,
    pub required_approving_review_count: Option<u32>,
    pub required_status_check_contexts: Option<Vec<String>>,
    pub requires_approving_reviews: bool,
    pub requires_code_owner_reviews: bool,
    pub requires_commit_signatures: bool,
    pub requires_conversation_resolution: bool,
    pub requires_linear_history: bool,
    pub requires_status_checks: bool,
    pub requires_strict_status_checks: bool,
    pub restricts_pushes: bool,
    pub restricts_review_dismissals: bool,
    pub review_dismissal_allowances: Connection<ActorAllowance>,
}

/// A repository together with its branch protection rules.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryBranchProtections {
    /// The repository name
    pub name: String,
    /// The rules configured on the repository
    #[serde(default)]
    pub branch_protection_rules: Connection<BranchProtectionRule>,
}

/// Every repository of one owner together with its branch protection rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerBranchProtections {
    /// The owner login as GitHub reports it
    pub login: String,
    /// The owner's repositories, ordered by name
    pub repositories: Vec<RepositoryBranchProtections>,
}
