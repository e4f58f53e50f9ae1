//! Tests for the repository import runner.

use super::*;
use crate::commands::fakes::{repository, FakeOrganization, RecordingImporter};

#[test]
fn test_args_parse() {
    let args = ImportArgs::try_parse_from(["import-repositories", "acme", "-c", "tf-export.toml"])
        .expect("valid arguments");

    assert_eq!(args.org, "acme");
    assert_eq!(
        args.common.config.as_deref(),
        Some(std::path::Path::new("tf-export.toml"))
    );
}

#[tokio::test]
async fn test_imports_first_page_only() {
    let client = FakeOrganization {
        repositories: vec![repository("should-not-be-used")],
        first_page: vec![repository("api"), repository("my.repo")],
        ..Default::default()
    };
    let importer = RecordingImporter::default();
    let mut out = Vec::new();

    execute(&client, &importer, "acme", &mut out)
        .await
        .expect("import succeeds");

    assert_eq!(client.calls(), vec!["list_org_repositories_first_page(acme)"]);
    assert_eq!(
        importer.imported(),
        vec![
            ("github_repository.acme-api".to_string(), "api".to_string()),
            (
                "github_repository.acme-my_repo".to_string(),
                "my.repo".to_string()
            ),
        ]
    );
    assert_eq!(
        String::from_utf8(out).expect("utf-8"),
        "Imported: github_repository.acme-api\nImported: github_repository.acme-my_repo\n"
    );
}

#[tokio::test]
async fn test_failure_aborts_remaining_imports() {
    let client = FakeOrganization {
        first_page: vec![repository("api"), repository("web"), repository("docs")],
        ..Default::default()
    };
    let importer = RecordingImporter {
        reject_id: Some("web".to_string()),
        ..Default::default()
    };
    let mut out = Vec::new();

    let result = execute(&client, &importer, "acme", &mut out).await;

    match result {
        Err(Error::Export(tf_export_core::Error::ImportFailed { address, stderr, .. })) => {
            assert_eq!(address.to_string(), "github_repository.acme-web");
            assert!(stderr.contains("already managed"));
        }
        other => panic!("Expected ImportFailed, got {:?}", other),
    }
    assert_eq!(
        importer.imported(),
        vec![("github_repository.acme-api".to_string(), "api".to_string())]
    );
}

#[tokio::test]
async fn test_empty_organization_imports_nothing() {
    let client = FakeOrganization::default();
    let importer = RecordingImporter::default();
    let mut out = Vec::new();

    execute(&client, &importer, "acme", &mut out)
        .await
        .expect("nothing to import");

    assert!(importer.imported().is_empty());
    assert!(out.is_empty());
}
