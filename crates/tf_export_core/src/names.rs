//! Terraform resource names and addresses.
//!
//! GitHub repository names and branch patterns may contain characters that are
//! not valid in a Terraform resource name. [`sanitize_resource_name`] maps them
//! onto a valid identifier; [`ResourceAddress`] pairs the result with its
//! resource type.

use std::fmt;

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;

/// Resource type of an exported repository.
pub const REPOSITORY_RESOURCE_TYPE: &str = "github_repository";

/// Resource type of an exported branch protection rule.
pub const BRANCH_PROTECTION_RESOURCE_TYPE: &str = "github_branch_protection";

/// Returns `raw` with every character that is invalid in a resource name
/// replaced.
///
/// - `*` becomes `_wild_`
/// - `/` and `.` become `_`
/// - any other character outside `[A-Za-z0-9_-]` becomes `_<hex code point>_`
///
/// # Examples
///
/// ```rust
/// use tf_export_core::sanitize_resource_name;
///
/// assert_eq!(sanitize_resource_name("release/*"), "release__wild_");
/// assert_eq!(sanitize_resource_name("my.repo"), "my_repo");
/// assert_eq!(sanitize_resource_name("v[0-9]"), "v_5b_0-9_5d_");
/// ```
pub fn sanitize_resource_name(raw: &str) -> String {
    let mut sanitized = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '*' => sanitized.push_str("_wild_"),
            '/' | '.' => sanitized.push('_'),
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => sanitized.push(c),
            c => sanitized.push_str(&format!("_{:x}_", u32::from(c))),
        }
    }
    sanitized
}

/// The address Terraform uses to bind configuration to state, such as
/// `github_repository.acme-my_repo`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceAddress {
    resource_type: &'static str,
    name: String,
}

impl ResourceAddress {
    /// Creates an address from a resource type and an already sanitized name.
    pub fn new(resource_type: &'static str, name: String) -> Self {
        Self {
            resource_type,
            name,
        }
    }

    /// Address of the repository resource for `repository` owned by `owner`.
    pub fn repository(owner: &str, repository: &str) -> Self {
        Self::new(
            REPOSITORY_RESOURCE_TYPE,
            repository_resource_name(owner, repository),
        )
    }

    /// Address of the branch protection resource for `pattern` on
    /// `repository` owned by `owner`.
    pub fn branch_protection(owner: &str, repository: &str, pattern: &str) -> Self {
        Self::new(
            BRANCH_PROTECTION_RESOURCE_TYPE,
            format!(
                "{}-{}",
                repository_resource_name(owner, repository),
                sanitize_resource_name(pattern)
            ),
        )
    }

    /// The resource type, such as `github_repository`.
    pub fn resource_type(&self) -> &str {
        self.resource_type
    }

    /// The resource name, used as the second label of the resource block.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// `<owner>-<sanitized repository>`, shared by repository and branch
/// protection resources so the latter can reference the former.
pub fn repository_resource_name(owner: &str, repository: &str) -> String {
    format!("{}-{}", owner, sanitize_resource_name(repository))
}
