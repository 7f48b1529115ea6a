//! Adapter boundary to the external policy engine.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::decision::{Decision, DecisionRequest};
use crate::error::DecisionEngineError;

/// Asks the policy engine for a verdict.
///
/// Implementations own no request state. `decide` may suspend (network or
/// computation); callers hold their request scope across the `.await`.
///
/// ```ignore
/// let decision = client.decide(&DecisionRequest::new("user:1", "read", "document:42")?).await?;
/// ```
#[async_trait]
pub trait DecisionClient: Send + Sync {
    /// Evaluate one `(actor, action, resource)` triple.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionEngineError`] when the engine is unreachable or the
    /// policy evaluation fails. A refusal is `Ok(Decision::Deny)`, never an
    /// error.
    async fn decide(&self, request: &DecisionRequest) -> Result<Decision, DecisionEngineError>;
}

/// Matches any actor, action or resource in a [`StaticPolicy`] rule.
pub const WILDCARD: &str = "*";

/// In-memory allow-list engine.
///
/// Every triple not matched by a rule is denied. Each rule component may be
/// [`WILDCARD`].
///
/// # Examples
///
/// ```
/// use authz_guard::{DecisionRequest, StaticPolicy};
///
/// let policy = StaticPolicy::new()
///     .allow("user:1", "read", "document:42")
///     .allow("*", "read", "document:public");
///
/// assert!(policy.allows(&DecisionRequest::new("user:9", "read", "document:public").unwrap()));
/// assert!(!policy.allows(&DecisionRequest::new("user:9", "edit", "document:public").unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPolicy {
    rules: HashSet<(String, String, String)>,
}

impl StaticPolicy {
    /// Creates an engine that denies everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an allow rule.
    pub fn allow(
        mut self,
        actor: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        self.rules
            .insert((actor.into(), action.into(), resource.into()));
        self
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule has been added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates a request synchronously.
    pub fn allows(&self, request: &DecisionRequest) -> bool {
        fn matches(pattern: &str, value: &str) -> bool {
            pattern == WILDCARD || pattern == value
        }

        self.rules.iter().any(|(actor, action, resource)| {
            matches(actor, request.actor())
                && matches(action, request.action())
                && matches(resource, request.resource())
        })
    }
}

#[async_trait]
impl DecisionClient for StaticPolicy {
    async fn decide(&self, request: &DecisionRequest) -> Result<Decision, DecisionEngineError> {
        let decision = if self.allows(request) {
            Decision::Allow
        } else {
            Decision::Deny
        };
        tracing::trace!(%request, %decision, "static policy evaluated");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(actor: &str, action: &str, resource: &str) -> DecisionRequest {
        DecisionRequest::new(actor, action, resource).unwrap()
    }

    #[test]
    fn empty_policy_denies() {
        let policy = StaticPolicy::new();
        assert!(policy.is_empty());
        assert!(!policy.allows(&req("user:1", "read", "document:42")));
    }

    #[test]
    fn exact_rule_matches_only_its_triple() {
        let policy = StaticPolicy::new().allow("user:1", "read", "document:42");

        assert!(policy.allows(&req("user:1", "read", "document:42")));
        assert!(!policy.allows(&req("user:2", "read", "document:42")));
        assert!(!policy.allows(&req("user:1", "edit", "document:42")));
        assert!(!policy.allows(&req("user:1", "read", "document:43")));
    }

    #[test]
    fn wildcards_match_any_component() {
        let policy = StaticPolicy::new().allow("admin:1", WILDCARD, WILDCARD);

        assert!(policy.allows(&req("admin:1", "delete", "document:1")));
        assert!(!policy.allows(&req("user:1", "delete", "document:1")));
    }

    #[test]
    fn duplicate_rules_collapse() {
        let policy = StaticPolicy::new()
            .allow("user:1", "read", "document:42")
            .allow("user:1", "read", "document:42");
        assert_eq!(policy.len(), 1);
    }
}
