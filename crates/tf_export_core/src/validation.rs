//! Validation of branch protection records against what the Terraform GitHub
//! provider can express.
//!
//! Validation never aborts on its own. It returns every violation it finds in a
//! [`ValidationReport`], and the caller decides through [`ViolationPolicy`]
//! whether one invalid rule ends the run or is skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actors::ActorError;

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;

/// What to do with a rule that fails validation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationPolicy {
    /// Stop the whole run at the first invalid rule.
    #[default]
    Abort,
    /// Log the violations and continue with the next rule.
    Skip,
}

/// Which checks are applied, and how violations are handled.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationRules {
    /// Treat an enabled "require last push approval" setting as unsupported.
    ///
    /// Off by default: the setting is accepted and silently not exported.
    pub reject_last_push_approval: bool,

    pub on_violation: ViolationPolicy,
}

/// The allowance lists that carry actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowanceList {
    BypassForcePush,
    BypassPullRequest,
    ReviewDismissal,
}

impl fmt::Display for AllowanceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AllowanceList::BypassForcePush => "bypass force push allowances",
            AllowanceList::BypassPullRequest => "bypass pull request allowances",
            AllowanceList::ReviewDismissal => "review dismissal allowances",
        };
        f.write_str(name)
    }
}

/// A single reason a rule cannot be exported.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("lock branch is enabled")]
    LockBranch,

    #[error("lock allows fetch and merge is enabled")]
    LockAllowsFetchAndMerge,

    #[error("require last push approval is enabled")]
    RequireLastPushApproval,

    #[error("{list} are incomplete: GitHub returned only the first page")]
    Truncated { list: AllowanceList },

    #[error("{list} contain an unsupported actor: {reason}")]
    UnsupportedActor {
        list: AllowanceList,
        reason: ActorError,
    },
}

/// Every violation found for one rule. Never empty when returned as an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
