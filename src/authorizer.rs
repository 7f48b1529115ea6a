use std::fmt;
use std::sync::Arc;

use crate::client::DecisionClient;
use crate::context::RequestScope;
use crate::decision::{Decision, DecisionRequest};
use crate::error::AuthzError;

/// The authorization gate handlers go through.
///
/// `Authorizer` consults the [`DecisionClient`] and records the outcome into
/// the request's [`RequestScope`]. It fails closed: a denial is returned as
/// [`AuthzError::Forbidden`] so that `?` aborts the handler at the call site.
///
/// Cheap to clone (`Arc` inside); one instance serves every request.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use authz_guard::{Authorizer, RequestMeta, RequestScope, StaticPolicy};
///
/// # async fn run() -> Result<(), authz_guard::AuthzError> {
/// let authorizer = Authorizer::new(Arc::new(
///     StaticPolicy::new().allow("user:1", "read", "document:42"),
/// ));
/// let scope = RequestScope::new(RequestMeta {
///     request_id: "req-1".to_string(),
///     route: "/documents/{id}".to_string(),
///     method: "GET".to_string(),
/// });
///
/// authorizer.authorize(&scope, "user:1", "read", "document:42").await?;
/// assert!(scope.is_satisfied());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Authorizer {
    client: Arc<dyn DecisionClient>,
}

impl Authorizer {
    /// Creates an authorizer backed by the given engine.
    pub fn new(client: Arc<dyn DecisionClient>) -> Self {
        Self { client }
    }

    /// Requests a decision and records it into `scope`.
    ///
    /// # Errors
    ///
    /// - [`AuthzError::Context`] if the request has already been enforced,
    ///   either before the call or while the engine was deciding; a late
    ///   decision is not recorded
    /// - [`AuthzError::InvalidRequest`] if any identifier is blank
    /// - [`AuthzError::DecisionEngine`] if the engine failed; the scope is
    ///   left untouched
    /// - [`AuthzError::Forbidden`] if the engine denied; the denial is
    ///   recorded and the scope is not authorized
    pub async fn authorize(
        &self,
        scope: &RequestScope,
        actor: &str,
        action: &str,
        resource: &str,
    ) -> Result<(), AuthzError> {
        scope.ensure_active()?;
        let request = DecisionRequest::new(actor, action, resource)?;

        let decision = match self.client.decide(&request).await {
            Ok(decision) => decision,
            Err(err) => {
                scope
                    .log()
                    .error(format_args!("policy engine failed for {request}: {err}"));
                return Err(err.into());
            }
        };

        // The post-check may have run while the engine was deciding.
        scope.ensure_active()?;

        let record = request.into_record(decision);
        match decision {
            Decision::Allow => {
                scope.log().debug(format_args!("authorized: {record}"));
                scope.record_allow(record);
                Ok(())
            }
            Decision::Deny => {
                scope.log().warn(format_args!("denied: {record}"));
                scope.record_denial(record.clone());
                Err(record.into_forbidden())
            }
        }
    }
}

impl fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer").finish_non_exhaustive()
    }
}
