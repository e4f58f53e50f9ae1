//! Export of GitHub organization settings as Terraform configuration.
//!
//! Repositories and branch protection rules fetched with `github_client` are
//! mapped onto `github_repository` and `github_branch_protection` resources.
//! Each resource can either be rendered as HCL or imported into Terraform
//! state through a [`StateImporter`].
//!
//! Branch protection rules go through validation first. Settings the
//! Terraform provider cannot express fail the rule instead of being dropped,
//! and only a [`ValidatedRule`] can be rendered or imported.
//!
//! ```rust
//! use tf_export_core::{sanitize_resource_name, ResourceAddress};
//!
//! assert_eq!(sanitize_resource_name("release/*"), "release__wild_");
//!
//! let address = ResourceAddress::branch_protection("acme", "my.repo", "release/*");
//! assert_eq!(
//!     address.to_string(),
//!     "github_branch_protection.acme-my_repo-release__wild_"
//! );
//! ```

pub mod actors;
pub use actors::{resolve_actor, ActorError};

pub mod branch_protection;
pub use branch_protection::{
    BranchProtectionRecord, ValidatedRule, BRANCH_PROTECTION_IMPORT_ARGS,
};

pub mod errors;
pub use errors::Error;

pub mod export;
pub use export::{
    import_targets, plan_branch_protections, plan_repositories, write_blocks,
    BranchProtectionPlan,
};

pub mod hcl;

pub mod import;
pub use import::{ImportTarget, StateImporter, TerraformImporter, TerraformSettings};

pub mod names;
pub use names::{sanitize_resource_name, ResourceAddress};

pub mod repository;
pub use repository::{
    CreationPolicy, PolicySource, RepositoryPolicy, RepositoryResource,
    SecurityAndAnalysisPolicy,
};

pub mod validation;
pub use validation::{AllowanceList, ValidationReport, ValidationRules, Violation, ViolationPolicy};
