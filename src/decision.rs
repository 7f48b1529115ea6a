//! Decision values exchanged with the policy engine.

use std::fmt;

use crate::error::AuthzError;

/// The policy engine's verdict for an `(actor, action, resource)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Access is granted
    Allow,
    /// Access is refused
    Deny,
}

impl Decision {
    /// Returns true for [`Decision::Allow`].
    pub fn is_allow(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Deny => write!(f, "deny"),
        }
    }
}

/// A validated question for the policy engine.
///
/// Actor and resource are opaque identifiers (for example `user:1` and
/// `document:42`); action is an opaque verb such as `read`.
///
/// # Examples
///
/// ```
/// use authz_guard::DecisionRequest;
///
/// let request = DecisionRequest::new("user:1", "read", "document:42").unwrap();
/// assert_eq!(request.actor(), "user:1");
///
/// assert!(DecisionRequest::new("", "read", "document:42").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    actor: String,
    action: String,
    resource: String,
}

impl DecisionRequest {
    /// Builds a request, rejecting blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::InvalidRequest`] if any component is empty or
    /// whitespace only.
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Result<Self, AuthzError> {
        let actor = actor.into();
        let action = action.into();
        let resource = resource.into();

        for (name, value) in [("actor", &actor), ("action", &action), ("resource", &resource)] {
            if value.trim().is_empty() {
                return Err(AuthzError::InvalidRequest(format!("{name} must not be empty")));
            }
        }

        Ok(Self {
            actor,
            action,
            resource,
        })
    }

    /// Returns the actor identifier.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Returns the action.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the resource identifier.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Pairs this request with the engine's verdict.
    pub fn into_record(self, decision: Decision) -> DecisionRecord {
        DecisionRecord {
            decision,
            actor: self.actor,
            action: self.action,
            resource: self.resource,
        }
    }
}

impl fmt::Display for DecisionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "actor={} action={} resource={}",
            self.actor, self.action, self.resource
        )
    }
}

/// A decision as recorded into a request's auth state, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    decision: Decision,
    actor: String,
    action: String,
    resource: String,
}

impl DecisionRecord {
    /// Returns the verdict.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Returns the actor identifier.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Returns the action.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the resource identifier.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub(crate) fn into_forbidden(self) -> AuthzError {
        AuthzError::Forbidden {
            actor: self.actor,
            action: self.action,
            resource: self.resource,
        }
    }
}

impl fmt::Display for DecisionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} actor={} action={} resource={}",
            self.decision, self.actor, self.action, self.resource
        )
    }
}
