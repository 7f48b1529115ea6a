use std::sync::Arc;

use parking_lot::Mutex;

use crate::decision::DecisionRecord;
use crate::error::AuthzError;
use crate::logging::ScopeLog;
use crate::request::RequestMeta;
use crate::state::RequestAuthState;

/// Where a request is in the enforcement lifecycle.
///
/// ```text
/// Pending --handler returned--> Handled --post-check--> Enforced
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnforcementPhase {
    /// Scope created, handler not yet finished
    Pending,
    /// Handler produced a response, post-check not yet run
    Handled,
    /// Post-check done; the request is no longer active
    Enforced,
}

/// Request-local authorization context.
///
/// A `RequestScope` is created once per request by the enforcement
/// middleware and owns that request's [`RequestAuthState`]. Cloning a scope
/// clones the handle, not the state: every clone observes and mutates the
/// same flags, which is how sub-tasks spawned by a handler stay in sync.
///
/// # Examples
///
/// ```
/// use authz_guard::{RequestMeta, RequestScope};
///
/// let scope = RequestScope::new(RequestMeta {
///     request_id: "req-1".to_string(),
///     route: "/public".to_string(),
///     method: "GET".to_string(),
/// });
///
/// let handle = scope.clone();
/// handle.mark_exempt(None).unwrap();
///
/// assert!(scope.is_satisfied());
/// ```
#[derive(Debug, Clone)]
pub struct RequestScope {
    inner: Arc<ScopeInner>,
}

#[derive(Debug)]
struct ScopeInner {
    meta: RequestMeta,
    state: Mutex<RequestAuthState>,
    phase: Mutex<EnforcementPhase>,
}

impl RequestScope {
    /// Creates a scope in the `Pending` phase with a fresh auth state.
    pub fn new(meta: RequestMeta) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                meta,
                state: Mutex::new(RequestAuthState::new()),
                phase: Mutex::new(EnforcementPhase::Pending),
            }),
        }
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.inner.meta.request_id
    }

    /// Returns the matched route template.
    pub fn route(&self) -> &str {
        &self.inner.meta.route
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &str {
        &self.inner.meta.method
    }

    /// Returns a logger bound to this request.
    pub fn log(&self) -> ScopeLog<'_> {
        ScopeLog::new(self.request_id(), self.route())
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> EnforcementPhase {
        *self.inner.phase.lock()
    }

    /// Returns a copy of the auth state for inspection.
    pub fn snapshot(&self) -> RequestAuthState {
        self.inner.state.lock().clone()
    }

    /// Returns true if the request is authorized or exempt.
    pub fn is_satisfied(&self) -> bool {
        self.inner.state.lock().is_satisfied()
    }

    /// Returns true if the most recent decision for this request was a denial.
    pub fn is_denied(&self) -> bool {
        self.inner.state.lock().is_denied()
    }

    /// Marks the request exempt from the authorization requirement.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Context`] if the request has already been
    /// enforced.
    pub fn mark_exempt(&self, reason: Option<&str>) -> Result<(), AuthzError> {
        self.ensure_active()?;
        self.inner.state.lock().mark_exempt(reason);
        Ok(())
    }

    /// Fails unless the post-check has yet to run.
    pub(crate) fn ensure_active(&self) -> Result<(), AuthzError> {
        if self.phase() == EnforcementPhase::Enforced {
            return Err(AuthzError::context(format!(
                "request {} on route '{}' has already completed",
                self.request_id(),
                self.route()
            )));
        }
        Ok(())
    }

    pub(crate) fn record_allow(&self, record: DecisionRecord) {
        self.inner.state.lock().mark_authorized(record);
    }

    pub(crate) fn record_denial(&self, record: DecisionRecord) {
        self.inner.state.lock().record_denial(record);
    }

    pub(crate) fn advance(&self, next: EnforcementPhase) {
        let mut phase = self.inner.phase.lock();
        debug_assert!(
            matches!(
                (*phase, next),
                (EnforcementPhase::Pending, EnforcementPhase::Handled)
                    | (EnforcementPhase::Handled, EnforcementPhase::Enforced)
            ),
            "invalid phase transition {:?} -> {:?}",
            *phase,
            next
        );
        *phase = next;
    }
}
