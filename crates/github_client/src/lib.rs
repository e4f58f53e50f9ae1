//! Crate for reading organization data from the GitHub REST and GraphQL APIs.
//!
//! This crate provides a client authenticated with a personal access token
//! that lists an organization's repositories and its branch protection rules.
//! Every call is a plain sequential request; there is no retry and no
//! concurrent paging.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub mod branch_protection;
pub use branch_protection::{
    Actor, ActorAllowance, ActorOrganization, BranchProtectionRule, Connection,
    OwnerBranchProtections, PageInfo, RepositoryBranchProtections,
};

pub mod errors;
pub use errors::Error;

pub mod repository;
pub use repository::Repository;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of repositories requested per GraphQL page.
const GRAPHQL_PAGE_SIZE: u32 = 100;

const BRANCH_PROTECTIONS_QUERY: &str = r#"
query($login: String!, $first: Int!, $cursor: String) {
    repositoryOwner(login: $login) {
        login
        repositories(first: $first, after: $cursor, orderBy: {field: NAME, direction: ASC}) {
            pageInfo { hasNextPage endCursor }
            nodes {
                name
                branchProtectionRules(first: 100) {
                    pageInfo { hasNextPage endCursor }
                    nodes {
                        pattern
                        allowsDeletions
                        allowsForcePushes
                        blocksCreations
                        bypassForcePushAllowances(first: 100) {
                            pageInfo { hasNextPage endCursor }
                            nodes {
                                actor {
                                    __typename
                                    ... on App { name }
                                    ... on Team { name organization { login } }
                                    ... on User { login }
                                }
                            }
                        }
                        bypassPullRequestAllowances(first: 100) {
                            pageInfo { hasNextPage endCursor }
                            nodes {
                                actor {
                                    __typename
                                    ... on App { name }
                                    ... on Team { name organization { login } }
                                    ... on User { login }
                                }
                            }
                        }
                        dismissesStaleReviews
                        isAdminEnforced
                        lockAllowsFetchAndMerge
                        lockBranch
                        requireLastPushApproval
                        requiredApprovingReviewCount
                        requiredStatusCheckContexts
                        requiresApprovingReviews
                        requiresCodeOwnerReviews
                        requiresCommitSignatures
                        requiresConversationResolution
                        requiresLinearHistory
                        requiresStatusChecks
                        requiresStrictStatusChecks
                        restrictsPushes
                        restrictsReviewDismissals
                        reviewDismissalAllowances(first: 100) {
                            pageInfo { hasNextPage endCursor }
                            nodes {
                                actor {
                                    __typename
                                    ... on App { name }
                                    ... on Team { name organization { login } }
                                    ... on User { login }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchProtectionsData {
    repository_owner: Option<BranchProtectionsOwner>,
}

#[derive(Debug, Deserialize)]
struct BranchProtectionsOwner {
    login: String,
    repositories: Connection<RepositoryBranchProtections>,
}

#[derive(Serialize)]
struct BranchProtectionsVariables<'a> {
    login: &'a str,
    first: u32,
    cursor: Option<&'a str>,
}

/// A client for reading organization data from the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Wraps an already configured `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    async fn query_branch_protections_page(
        &self,
        org_name: &str,
        cursor: Option<&str>,
    ) -> Result<BranchProtectionsOwner, Error> {
        let variables = BranchProtectionsVariables {
            login: org_name,
            first: GRAPHQL_PAGE_SIZE,
            cursor,
        };

        let result: OctocrabResult<GraphQlResponse<BranchProtectionsData>> = self
            .client
            .graphql(&serde_json::json!({
                "query": BRANCH_PROTECTIONS_QUERY,
                "variables": variables,
            }))
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return Err(map_octocrab_error("Failed to query branch protections", e)),
        };

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            error!(
                org_name = org_name,
                errors = ?messages,
                "GraphQL query for branch protections returned errors"
            );
            return Err(Error::GraphQl(messages));
        }

        let owner = response
            .data
            .ok_or(Error::InvalidResponse)?
            .repository_owner
            .ok_or_else(|| {
                error!(org_name = org_name, "No repository owner with this login");
                Error::NotFound
            })?;

        Ok(owner)
    }
}

/// Read access to an organization's repositories and branch protections.
///
/// The exporters depend on this trait rather than on [`GitHubClient`] so the
/// command logic can be exercised without a network.
#[async_trait]
pub trait OrganizationClient: Send + Sync {
    /// Lists every repository of an organization, following pagination.
    ///
    /// Repositories are requested `per_page` at a time and sorted by full name.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the organization does not exist and
    /// `Error::ApiError` for any other failed request.
    async fn list_org_repositories(
        &self,
        org_name: &str,
        per_page: u8,
    ) -> Result<Vec<Repository>, Error>;

    /// Lists the first page of an organization's repositories, using the API's
    /// default page size. No further pages are requested.
    async fn list_org_repositories_first_page(
        &self,
        org_name: &str,
    ) -> Result<Vec<Repository>, Error>;

    /// Fetches every repository of an organization along with its branch
    /// protection rules, using the GraphQL API.
    ///
    /// The returned login is spelled the way GitHub stores it, which may differ
    /// in case from `org_name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the login does not resolve to a repository
    /// owner and `Error::GraphQl` if the query itself is rejected.
    async fn list_branch_protections(
        &self,
        org_name: &str,
    ) -> Result<OwnerBranchProtections, Error>;
}

#[async_trait]
impl OrganizationClient for GitHubClient {
    #[instrument(skip(self), fields(org_name = %org_name))]
    async fn list_org_repositories(
        &self,
        org_name: &str,
        per_page: u8,
    ) -> Result<Vec<Repository>, Error> {
        let first = self
            .client
            .orgs(org_name)
            .list_repos()
            .sort(octocrab::params::repos::Sort::FullName)
            .per_page(per_page)
            .page(1u32)
            .send()
            .await;

        let mut page = match first {
            Ok(p) => p,
            Err(e) => return Err(map_octocrab_error("Failed to list repositories", e)),
        };

        let mut repositories = Vec::new();
        let mut page_number = 1;
        loop {
            let next = page.next.clone();
            let items = page.take_items();
            debug!(
                page = page_number,
                count = items.len(),
                "Received page of repositories"
            );
            repositories.extend(items.into_iter().map(Repository::from));

            match self
                .client
                .get_page::<octocrab::models::Repository>(&next)
                .await
            {
                Ok(Some(p)) => {
                    page = p;
                    page_number += 1;
                }
                Ok(None) => break,
                Err(e) => return Err(map_octocrab_error("Failed to get page of repositories", e)),
            }
        }

        info!(
            org_name = org_name,
            count = repositories.len(),
            pages = page_number,
            "Listed organization repositories"
        );
        Ok(repositories)
    }

    #[instrument(skip(self), fields(org_name = %org_name))]
    async fn list_org_repositories_first_page(
        &self,
        org_name: &str,
    ) -> Result<Vec<Repository>, Error> {
        let result = self.client.orgs(org_name).list_repos().send().await;
        match result {
            Ok(mut page) => {
                let repositories: Vec<Repository> = page
                    .take_items()
                    .into_iter()
                    .map(Repository::from)
                    .collect();
                info!(
                    org_name = org_name,
                    count = repositories.len(),
                    "Listed first page of organization repositories"
                );
                Ok(repositories)
            }
            Err(e) => Err(map_octocrab_error("Failed to list repositories", e)),
        }
    }

    #[instrument(skip(self), fields(org_name = %org_name))]
    async fn list_branch_protections(
        &self,
        org_name: &str,
    ) -> Result<OwnerBranchProtections, Error> {
        let mut login: String;
        let mut repositories = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let owner = self
                .query_branch_protections_page(org_name, cursor.as_deref())
                .await?;
            login = owner.login;
            let page = owner.repositories;

            for repo in &page.nodes {
                if repo.branch_protection_rules.is_truncated() {
                    warn!(
                        repository = repo.name.as_str(),
                        "Repository has more branch protection rules than were fetched"
                    );
                }
                for rule in &repo.branch_protection_rules.nodes {
                    if rule.bypass_force_push_allowances.is_truncated()
                        || rule.bypass_pull_request_allowances.is_truncated()
                        || rule.review_dismissal_allowances.is_truncated()
                    {
                        warn!(
                            repository = repo.name.as_str(),
                            pattern = rule.pattern.as_str(),
                            "Branch protection rule has more allowances than were fetched"
                        );
                    }
                }
            }

            let page_info = page.page_info.unwrap_or_default();
            repositories.extend(page.nodes);

            match (page_info.has_next_page, page_info.end_cursor) {
                (true, Some(end)) => cursor = Some(end),
                (true, None) => {
                    error!("GraphQL page claims more results but has no end cursor");
                    return Err(Error::InvalidResponse);
                }
                (false, _) => break,
            }
        }

        info!(
            org_name = org_name,
            login = login.as_str(),
            count = repositories.len(),
            "Fetched branch protections for organization"
        );
        Ok(OwnerBranchProtections {
            login,
            repositories,
        })
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The personal access token.
/// * `base_uri` - Optional API root, for GitHub Enterprise or tests. Defaults to
///   `https://api.github.com`.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the base URI is invalid or the client
/// cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, Error};
/// use secrecy::SecretString;
///
/// fn main() -> Result<(), Error> {
///     let token = SecretString::from("ghp_example".to_string());
///     let octocrab = create_token_client(&token, None)?;
///     let client = GitHubClient::new(octocrab);
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &SecretString, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid GitHub API base URI '{}': {}", uri, e))
        })?;
    }

    builder
        .personal_token(token.expose_secret().to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with a personal token");
            Error::AuthError("Failed to build a client for the personal token.".to_string())
        })
}

fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    let mapped = match &e {
        octocrab::Error::GitHub { source, .. } => match source.status_code.as_u16() {
            404 => Error::NotFound,
            403 | 429 if source.message.to_ascii_lowercase().contains("rate limit") => {
                Error::RateLimitExceeded
            }
            _ => Error::ApiError(),
        },
        _ => Error::ApiError(),
    };
    log_octocrab_error(message, e);
    mapped
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                status = err.status_code.as_u16(),
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
