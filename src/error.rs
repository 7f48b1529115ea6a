use thiserror::Error;

/// Errors raised while authorizing or enforcing a request.
///
/// Every variant maps to exactly one response status (see
/// [`AuthzError::status`]). Only [`AuthzError::Forbidden`] is a policy
/// outcome; all other variants signal a server fault or a programming error.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The policy engine denied the request.
    #[error("forbidden: '{actor}' may not '{action}' on '{resource}'")]
    Forbidden {
        /// Actor that was denied
        actor: String,
        /// Action that was attempted
        action: String,
        /// Resource the action targeted
        resource: String,
    },

    /// The policy engine failed to produce a decision.
    #[error(transparent)]
    DecisionEngine(#[from] DecisionEngineError),

    /// `authorize` or `skip_authorization` was called without an active request.
    #[error("no active request context: {0}")]
    Context(String),

    /// The `(actor, action, resource)` triple was incomplete.
    #[error("invalid authorization request: {0}")]
    InvalidRequest(String),

    /// Enforcement configuration could not be parsed.
    #[error("invalid enforcement config: {0}")]
    InvalidConfig(String),

    /// The handler finished without authorizing and without being exempted.
    #[error("authorization was not performed for route '{route}'")]
    AuthorizationNotPerformed {
        /// Matched route template of the offending request
        route: String,
    },
}

impl AuthzError {
    /// Creates a context error with the given message.
    pub fn context(message: impl Into<String>) -> Self {
        AuthzError::Context(message.into())
    }

    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthzError::Forbidden { .. } => "forbidden",
            AuthzError::DecisionEngine(_) => "decision_engine",
            AuthzError::Context(_) => "context",
            AuthzError::InvalidRequest(_) => "invalid_request",
            AuthzError::InvalidConfig(_) => "invalid_config",
            AuthzError::AuthorizationNotPerformed { .. } => "authorization_not_performed",
        }
    }

    /// Returns true if this error is a policy denial rather than a fault.
    pub fn is_denial(&self) -> bool {
        matches!(self, AuthzError::Forbidden { .. })
    }
}

/// Failure of the external policy engine itself.
///
/// Distinct from a deny: the engine could not be reached or the policy
/// evaluation errored, so no decision exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decision engine error: {message}")]
pub struct DecisionEngineError {
    message: String,
}

impl DecisionEngineError {
    /// Creates a new engine error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the engine's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_is_transparent() {
        let err: AuthzError = DecisionEngineError::new("connection refused").into();
        assert_eq!(err.to_string(), "decision engine error: connection refused");
        assert_eq!(err.kind(), "decision_engine");
        assert!(!err.is_denial());
    }

    #[test]
    fn not_performed_names_route() {
        let err = AuthzError::AuthorizationNotPerformed {
            route: "/forgot".to_string(),
        };
        assert!(err.to_string().contains("/forgot"));
    }

    #[test]
    fn only_forbidden_is_a_denial() {
        let denied = AuthzError::Forbidden {
            actor: "user:1".to_string(),
            action: "read".to_string(),
            resource: "document:42".to_string(),
        };
        assert!(denied.is_denial());
        assert!(!AuthzError::context("outside request").is_denial());
    }
}
