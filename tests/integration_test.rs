//! Facade-level tests: authorization and exemption without an HTTP stack.

use std::sync::Arc;

use authz_guard::{
    skip_authorization, Authorizer, Decision, EnforcementPhase, RequestMeta, RequestScope,
    StaticPolicy,
};

fn scope(route: &str) -> RequestScope {
    RequestScope::new(RequestMeta {
        request_id: format!("req-{route}"),
        route: route.to_string(),
        method: "GET".to_string(),
    })
}

fn authorizer() -> Authorizer {
    Authorizer::new(Arc::new(
        StaticPolicy::new().allow("user:1", "read", "document:42"),
    ))
}

#[tokio::test]
async fn allow_scenario_satisfies_scope() {
    let scope = scope("/documents/{id}");

    authorizer()
        .authorize(&scope, "user:1", "read", "document:42")
        .await
        .expect("user:1 may read document:42");

    assert!(scope.is_satisfied());
    assert_eq!(scope.phase(), EnforcementPhase::Pending);
}

#[tokio::test]
async fn deny_scenario_leaves_scope_unsatisfied() {
    let scope = scope("/documents/{id}");

    let err = authorizer()
        .authorize(&scope, "user:1", "edit", "document:42")
        .await
        .unwrap_err();

    assert!(err.is_denial());
    let state = scope.snapshot();
    assert!(!state.is_authorized());
    assert_eq!(state.last_decision().unwrap().decision(), Decision::Deny);
    assert_eq!(state.last_decision().unwrap().action(), "edit");
}

#[tokio::test]
async fn swallowed_denial_after_skip_is_still_unsatisfied() {
    let scope = scope("/public");
    skip_authorization(&scope, None).unwrap();

    let _ = authorizer()
        .authorize(&scope, "user:2", "read", "document:42")
        .await;

    assert!(scope.snapshot().is_exempt());
    assert!(!scope.is_satisfied());
}

#[tokio::test]
async fn separate_scopes_are_isolated() {
    let authorized = scope("/documents/{id}");
    let untouched = scope("/forgot");

    authorizer()
        .authorize(&authorized, "user:1", "read", "document:42")
        .await
        .unwrap();

    assert!(authorized.is_satisfied());
    assert!(!untouched.is_satisfied());
    assert!(untouched.snapshot().last_decision().is_none());
}
