//! Resolution of allowance actors to the identifiers the Terraform GitHub
//! provider accepts in actor lists.

use github_client::Actor;

#[cfg(test)]
#[path = "actors_tests.rs"]
mod tests;

/// Why an actor cannot be written into an actor list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActorError {
    #[error("GitHub App '{0}' cannot be expressed as a provider actor")]
    App(String),

    #[error("actor could not be resolved to a team or user")]
    Unresolved,
}

/// Resolves an allowance actor to its canonical string.
///
/// - a team resolves to `<organization>/<name>`
/// - a user resolves to `/<login>`
/// - apps, unknown actor kinds and missing actors are errors
///
/// # Examples
///
/// ```rust
/// use github_client::Actor;
/// use tf_export_core::resolve_actor;
///
/// let user = Actor::User { login: "octocat".to_string() };
/// assert_eq!(resolve_actor(Some(&user)).unwrap(), "/octocat");
/// assert!(resolve_actor(None).is_err());
/// ```
pub fn resolve_actor(actor: Option<&Actor>) -> Result<String, ActorError> {
    match actor {
        Some(Actor::Team { name, organization }) => Ok(format!("{}/{}", organization.login, name)),
        Some(Actor::User { login }) => Ok(format!("/{}", login)),
        Some(Actor::App { name }) => Err(ActorError::App(name.clone())),
        Some(Actor::Unsupported) | None => Err(ActorError::Unresolved),
    }
}
