//! Explicit exemption from the authorization requirement.

use crate::context::RequestScope;
use crate::error::AuthzError;

/// Marks the request behind `scope` as intentionally public.
///
/// Idempotent; the first non-blank `reason` is kept for diagnostics.
///
/// # Errors
///
/// Returns [`AuthzError::Context`] if the request has already been enforced.
pub fn skip_authorization(scope: &RequestScope, reason: Option<&str>) -> Result<(), AuthzError> {
    scope.mark_exempt(reason)?;
    match reason {
        Some(reason) => scope
            .log()
            .debug(format_args!("authorization skipped: {reason}")),
        None => scope.log().debug(format_args!("authorization skipped")),
    }
    Ok(())
}
