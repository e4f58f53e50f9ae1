use super::*;
use std::error::Error as StdError;
use std::io;

use crate::validation::Violation;

#[test]
fn test_validation_error_names_address_and_violations() {
    let error = Error::Validation {
        address: ResourceAddress::branch_protection("acme", "tools", "main"),
        report: ValidationReport::new(vec![Violation::LockBranch]),
    };

    assert_eq!(
        error.to_string(),
        "Branch protection rule github_branch_protection.acme-tools-main cannot be exported: \
         lock branch is enabled"
    );
}

#[test]
fn test_collision_error() {
    let error = Error::ResourceNameCollision {
        address: ResourceAddress::repository("acme", "my.repo"),
    };

    assert_eq!(
        error.to_string(),
        "More than one resource maps to the address github_repository.acme-my_repo"
    );
}

#[test]
fn test_import_spawn_error_keeps_source() {
    let error = Error::ImportSpawn {
        address: ResourceAddress::repository("acme", "tools"),
        binary: "terraform".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
    };

    assert!(error
        .to_string()
        .starts_with("Failed to run 'terraform' to import github_repository.acme-tools"));
    assert!(error.source().is_some());
}

#[test]
fn test_import_failed_error() {
    let error = Error::ImportFailed {
        address: ResourceAddress::repository("acme", "tools"),
        status: "exit status: 1".to_string(),
        stderr: "Resource already managed".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Import of github_repository.acme-tools failed with exit status: 1: Resource already managed"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_io_error_conversion() {
    let error = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));

    assert!(matches!(error, Error::Io(_)));
    assert_eq!(error.to_string(), "Failed to write output: closed");
}

#[test]
fn test_incomplete_rule_list_error_names_repository() {
    let error = Error::IncompleteRuleList {
        owner: "acme".to_string(),
        repository: "tools".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Branch protection rules of acme/tools are incomplete: GitHub returned only the first page"
    );
}
