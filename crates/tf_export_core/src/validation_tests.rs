use super::*;

#[test]
fn test_default_rules() {
    let rules = ValidationRules::default();

    assert!(!rules.reject_last_push_approval);
    assert_eq!(rules.on_violation, ViolationPolicy::Abort);
}

#[test]
fn test_violation_policy_deserialization() {
    #[derive(Deserialize)]
    struct Wrapper {
        policy: ViolationPolicy,
    }

    let skip: Wrapper = serde_json::from_str(r#"{ "policy": "skip" }"#).expect("valid policy");
    let abort: Wrapper = serde_json::from_str(r#"{ "policy": "abort" }"#).expect("valid policy");

    assert_eq!(skip.policy, ViolationPolicy::Skip);
    assert_eq!(abort.policy, ViolationPolicy::Abort);
    assert!(serde_json::from_str::<Wrapper>(r#"{ "policy": "retry" }"#).is_err());
}

#[test]
fn test_rules_deserialize_with_defaults() {
    let rules: ValidationRules =
        serde_json::from_str(r#"{ "reject_last_push_approval": true }"#).expect("valid rules");

    assert!(rules.reject_last_push_approval);
    assert_eq!(rules.on_violation, ViolationPolicy::Abort);
}

#[test]
fn test_report_display_joins_violations() {
    let report = ValidationReport::new(vec![
        Violation::LockBranch,
        Violation::UnsupportedActor {
            list: AllowanceList::BypassPullRequest,
            reason: ActorError::App("ci-bot".to_string()),
        },
    ]);

    assert_eq!(
        report.to_string(),
        "lock branch is enabled; bypass pull request allowances contain an unsupported actor: \
         GitHub App 'ci-bot' cannot be expressed as a provider actor"
    );
    assert_eq!(report.violations().len(), 2);
}

#[test]
fn test_truncated_violation_names_the_list() {
    let violation = Violation::Truncated {
        list: AllowanceList::BypassForcePush,
    };

    assert_eq!(
        violation.to_string(),
        "bypass force push allowances are incomplete: GitHub returned only the first page"
    );
}
