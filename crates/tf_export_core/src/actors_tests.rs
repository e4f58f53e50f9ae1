use super::*;
use github_client::ActorOrganization;

#[test]
fn test_team_resolves_to_org_and_name() {
    let team = Actor::Team {
        name: "platform".to_string(),
        organization: ActorOrganization {
            login: "acme".to_string(),
        },
    };

    assert_eq!(resolve_actor(Some(&team)), Ok("acme/platform".to_string()));
}

#[test]
fn test_user_resolves_to_slash_login() {
    let user = Actor::User {
        login: "octocat".to_string(),
    };

    assert_eq!(resolve_actor(Some(&user)), Ok("/octocat".to_string()));
}

#[test]
fn test_app_is_rejected() {
    let app = Actor::App {
        name: "dependabot".to_string(),
    };

    assert_eq!(
        resolve_actor(Some(&app)),
        Err(ActorError::App("dependabot".to_string()))
    );
}

#[test]
fn test_unknown_and_missing_actors_are_rejected() {
    assert_eq!(
        resolve_actor(Some(&Actor::Unsupported)),
        Err(ActorError::Unresolved)
    );
    assert_eq!(resolve_actor(None), Err(ActorError::Unresolved));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ActorError::App("ci-bot".to_string()).to_string(),
        "GitHub App 'ci-bot' cannot be expressed as a provider actor"
    );
    assert_eq!(
        ActorError::Unresolved.to_string(),
        "actor could not be resolved to a team or user"
    );
}
