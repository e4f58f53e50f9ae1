use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError();

    assert_eq!(error.to_string(), "API request failed");
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid credentials".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitHub client: Invalid credentials"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_graphql_error_joins_messages() {
    let error = Error::GraphQl(vec![
        "Field 'lockBranch' doesn't exist".to_string(),
        "Something else".to_string(),
    ]);

    assert_eq!(
        error.to_string(),
        "GraphQL query failed: Field 'lockBranch' doesn't exist; Something else"
    );
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound;

    assert_eq!(error.to_string(), "Resource not found");
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
    assert!(error.source().is_none());
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
