//! Per-request authorization record.
//!
//! [`RequestAuthState`] remembers whether a request sought an authorization
//! decision or was exempted. It is owned by the request's
//! [`RequestScope`](crate::RequestScope) and never outlives it.

use crate::decision::{Decision, DecisionRecord};

/// Authorization progress of a single request.
///
/// `authorized` and `exempt` are independent flags; either satisfies the
/// enforcement check. A denial recorded last overrides both.
///
/// # Examples
///
/// ```
/// use authz_guard::RequestAuthState;
///
/// let mut state = RequestAuthState::new();
/// assert!(!state.is_satisfied());
///
/// state.mark_exempt(Some("health probe"));
/// assert!(state.is_satisfied());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAuthState {
    authorized: bool,
    exempt: bool,
    skip_reason: Option<String>,
    last_decision: Option<DecisionRecord>,
}

impl RequestAuthState {
    /// Creates a fresh state: not authorized, not exempt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful decision.
    pub fn mark_authorized(&mut self, record: DecisionRecord) {
        debug_assert!(record.decision().is_allow());
        self.authorized = true;
        self.last_decision = Some(record);
    }

    /// Records a denial. Does not touch the `authorized` flag.
    pub fn record_denial(&mut self, record: DecisionRecord) {
        self.last_decision = Some(record);
    }

    /// Marks the request exempt. Repeated calls keep the first reason.
    pub fn mark_exempt(&mut self, reason: Option<&str>) {
        self.exempt = true;
        if self.skip_reason.is_none() {
            self.skip_reason = reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_owned);
        }
    }

    /// Returns true if the request may leave the process as-is.
    pub fn is_satisfied(&self) -> bool {
        (self.authorized || self.exempt) && !self.is_denied()
    }

    /// Returns true if the most recent decision was a denial.
    pub fn is_denied(&self) -> bool {
        self.last_decision
            .as_ref()
            .is_some_and(|d| d.decision() == Decision::Deny)
    }

    /// Returns true once an allow decision has been recorded.
    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Returns true once the request has been exempted.
    pub fn is_exempt(&self) -> bool {
        self.exempt
    }

    /// Reason supplied with the exemption, if any.
    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    /// Most recent decision recorded for this request.
    pub fn last_decision(&self) -> Option<&DecisionRecord> {
        self.last_decision.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::DecisionRequest;

    fn record(decision: Decision) -> DecisionRecord {
        DecisionRequest::new("user:1", "read", "document:42")
            .unwrap()
            .into_record(decision)
    }

    #[test]
    fn fresh_state_is_unsatisfied() {
        let state = RequestAuthState::new();
        assert!(!state.is_authorized());
        assert!(!state.is_exempt());
        assert!(state.last_decision().is_none());
        assert!(!state.is_satisfied());
    }

    #[test]
    fn allow_satisfies() {
        let mut state = RequestAuthState::new();
        state.mark_authorized(record(Decision::Allow));

        assert!(state.is_satisfied());
        assert_eq!(state.last_decision().unwrap().decision(), Decision::Allow);
    }

    #[test]
    fn denial_never_authorizes() {
        let mut state = RequestAuthState::new();
        state.record_denial(record(Decision::Deny));

        assert!(!state.is_authorized());
        assert!(state.is_denied());
        assert!(!state.is_satisfied());
    }

    #[test]
    fn allow_after_denial_clears_the_denial() {
        let mut state = RequestAuthState::new();
        state.record_denial(record(Decision::Deny));
        state.mark_authorized(record(Decision::Allow));

        assert!(!state.is_denied());
        assert!(state.is_satisfied());
    }

    #[test]
    fn denial_after_allow_is_unsatisfied() {
        let mut state = RequestAuthState::new();
        state.mark_authorized(record(Decision::Allow));
        state.record_denial(record(Decision::Deny));

        assert!(state.is_authorized());
        assert!(!state.is_satisfied());
    }

    #[test]
    fn exemption_is_idempotent_and_keeps_first_reason() {
        let mut state = RequestAuthState::new();
        state.mark_exempt(Some("public"));
        let once = state.clone();
        state.mark_exempt(Some("again"));
        state.mark_exempt(None);

        assert_eq!(state, once);
        assert_eq!(state.skip_reason(), Some("public"));
    }

    #[test]
    fn blank_reason_is_dropped() {
        let mut state = RequestAuthState::new();
        state.mark_exempt(Some("   "));
        assert!(state.is_exempt());
        assert_eq!(state.skip_reason(), None);
    }
}
