//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading organization
//! data from the GitHub REST and GraphQL APIs. None of these errors are retried
//! by the exporters; each one ends the run.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_org_repositories("acme", 10).await {
///     Ok(repos) => println!("Found {} repositories", repos.len()),
///     Err(Error::NotFound) => eprintln!("Organization does not exist"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    ///
    /// The underlying octocrab error has already been logged when this is returned.
    #[error("API request failed")]
    ApiError(),

    /// Authentication or GitHub client initialization failure.
    ///
    /// The contained string provides specific details about the failure.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The GraphQL endpoint answered with an `errors` array.
    ///
    /// GraphQL reports query failures with a successful HTTP status, so these
    /// are surfaced separately from transport errors. Contains the messages in
    /// the order GitHub returned them.
    #[error("GraphQL query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// Returned when the organization login does not resolve to a repository
    /// owner, or when a REST call answers with a 404.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
