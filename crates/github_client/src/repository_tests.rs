use super::*;
use serde_json::from_str;

#[test]
fn test_repository_creation() {
    let repo = Repository::new(
        "my-repo".to_string(),
        Some("acme".to_string()),
        Some("A repository".to_string()),
        Some("https://acme.example".to_string()),
    );

    assert_eq!(repo.name(), "my-repo");
    assert_eq!(repo.owner(), Some("acme"));
    assert_eq!(repo.description(), Some("A repository"));
    assert_eq!(repo.homepage(), Some("https://acme.example"));
}

#[test]
fn test_empty_strings_are_treated_as_absent() {
    let repo = Repository::new(
        "my-repo".to_string(),
        None,
        Some(String::new()),
        Some(String::new()),
    );

    assert_eq!(repo.description(), None);
    assert_eq!(repo.homepage(), None);
}

#[test]
fn test_repository_deserialization_with_missing_optionals() {
    let json_str = r#"{
        "name": "example-repo"
    }"#;

    let repo: Repository = from_str(json_str).expect("Failed to deserialize Repository");

    assert_eq!(repo.name(), "example-repo");
    assert_eq!(repo.owner(), None);
    assert_eq!(repo.description(), None);
}

#[test]
fn test_conversion_from_octocrab_repository() {
    let json = serde_json::json!({
        "id": 42,
        "name": "my.repo",
        "description": "Dotted name",
        "homepage": "https://example.com",
        "url": "https://api.github.com/repos/acme/my.repo"
    });
    let octo: octocrab::models::Repository =
        serde_json::from_value(json).expect("Failed to build octocrab repository");

    let repo = Repository::from(octo);

    assert_eq!(repo.name(), "my.repo");
    assert_eq!(repo.owner(), None);
    assert_eq!(repo.description(), Some("Dotted name"));
    assert_eq!(repo.homepage(), Some("https://example.com"));
}
