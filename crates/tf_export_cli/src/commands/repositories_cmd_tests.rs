//! Tests for the repository exporter.

use super::*;
use crate::commands::fakes::{repository, FakeOrganization};
use github_client::{create_token_client, GitHubClient};
use secrecy::SecretString;
use serde_json::json;
use tf_export_core::RepositoryPolicy;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_args_parse() {
    let args = RepositoriesArgs::try_parse_from([
        "export-repositories",
        "acme",
        "--token-file",
        "secrets/gh_token",
    ])
    .expect("valid arguments");

    assert_eq!(args.org, "acme");
    assert_eq!(
        args.common.token_file.as_deref(),
        Some(std::path::Path::new("secrets/gh_token"))
    );
}

#[test]
fn test_args_require_org() {
    assert!(RepositoriesArgs::try_parse_from(["export-repositories"]).is_err());
}

#[tokio::test]
async fn test_execute_renders_every_repository() {
    let client = FakeOrganization {
        repositories: vec![repository("api"), repository("my.repo")],
        ..Default::default()
    };
    let mut out = Vec::new();

    execute(&client, "acme", 25, &PolicySource::default(), &mut out)
        .await
        .expect("export succeeds");

    let text = String::from_utf8(out).expect("utf-8");
    assert!(text.starts_with("\nresource \"github_repository\" \"acme-api\" {\n"));
    assert!(text.contains("resource \"github_repository\" \"acme-my_repo\" {\n"));
    assert!(text.contains("  name = \"my.repo\"\n"));
    assert!(text.contains("  visibility = local.github_policy.visibility\n"));
    assert_eq!(client.calls(), vec!["list_org_repositories(acme, 25)"]);
}

#[tokio::test]
async fn test_execute_with_inline_policy() {
    let client = FakeOrganization {
        repositories: vec![repository("api")],
        ..Default::default()
    };
    let policy = PolicySource::Inline {
        values: RepositoryPolicy {
            visibility: "public".to_string(),
            ..Default::default()
        },
    };
    let mut out = Vec::new();

    execute(&client, "acme", 10, &policy, &mut out)
        .await
        .expect("export succeeds");

    let text = String::from_utf8(out).expect("utf-8");
    assert!(text.contains("  visibility = \"public\"\n"));
    assert!(!text.contains("local."));
}

#[tokio::test]
async fn test_execute_rejects_colliding_names() {
    let client = FakeOrganization {
        repositories: vec![repository("my.repo"), repository("my_repo")],
        ..Default::default()
    };
    let mut out = Vec::new();

    let result = execute(&client, "acme", 10, &PolicySource::default(), &mut out).await;

    assert!(matches!(
        result,
        Err(Error::Export(
            tf_export_core::Error::ResourceNameCollision { .. }
        ))
    ));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_execute_against_github_api() {
    let mock_server = MockServer::start().await;
    let next = format!(
        "<{}/orgs/acme/repos?per_page=10&sort=full_name&page=2>; rel=\"next\"",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!([{
                    "id": 1,
                    "name": "api",
                    "description": "Public API",
                    "homepage": "https://api.acme.dev",
                    "url": "https://api.github.com/repos/acme/api"
                }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 2,
            "name": "web",
            "url": "https://api.github.com/repos/acme/web"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let token = SecretString::from("test-token".to_string());
    let client = GitHubClient::new(
        create_token_client(&token, Some(&mock_server.uri())).expect("client builds"),
    );
    let mut out = Vec::new();

    execute(&client, "acme", 10, &PolicySource::default(), &mut out)
        .await
        .expect("export succeeds");

    let text = String::from_utf8(out).expect("utf-8");
    assert!(text.contains("  description = \"Public API\"\n"));
    assert!(text.contains("  homepage_url = \"https://api.acme.dev\"\n"));
    assert!(text.contains("resource \"github_repository\" \"acme-web\" {\n"));
    assert!(text.contains("  description = \"\"\n"));
}
