use super::*;
use std::error::Error as StdError;

#[test]
fn test_config_error_display() {
    let error = Error::Config("page_size must be between 1 and 100".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: page_size must be between 1 and 100"
    );
}

#[test]
fn test_load_token_error_keeps_source() {
    let error = Error::LoadToken {
        path: PathBuf::from("gh_token"),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    };

    assert_eq!(
        error.to_string(),
        "Failed to read the GitHub token from \"gh_token\""
    );
    assert!(error.source().is_some());
}

#[test]
fn test_empty_token_error_display() {
    let error = Error::EmptyToken(PathBuf::from("gh_token"));
    assert_eq!(error.to_string(), "The GitHub token file \"gh_token\" is empty");
}

#[test]
fn test_github_error_conversion() {
    let error = Error::from(github_client::Error::NotFound);

    assert!(matches!(error, Error::GitHub(github_client::Error::NotFound)));
    assert_eq!(error.to_string(), "GitHub request failed: Resource not found");
}

#[test]
fn test_export_error_is_transparent() {
    let inner = tf_export_core::Error::ResourceNameCollision {
        address: tf_export_core::ResourceAddress::repository("acme", "my.repo"),
    };
    let expected = inner.to_string();

    let error = Error::from(inner);

    assert_eq!(error.to_string(), expected);
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
