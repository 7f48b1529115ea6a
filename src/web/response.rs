//! Conversion of [`AuthzError`] into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::context::RequestScope;
use crate::error::AuthzError;

/// JSON body of every authorization error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<&'a str>,
}

impl AuthzError {
    /// HTTP status this error is surfaced as.
    ///
    /// Only a denial is a client error; everything else is a server fault so
    /// that a missing authorization check can never pass for a 403.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthzError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthzError::DecisionEngine(_)
            | AuthzError::Context(_)
            | AuthzError::InvalidRequest(_)
            | AuthzError::InvalidConfig(_)
            | AuthzError::AuthorizationNotPerformed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Triple and engine internals stay in the logs.
            AuthzError::Forbidden { .. } => "access denied".to_owned(),
            AuthzError::DecisionEngine(_) => "authorization service failure".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        error_response(&self, None)
    }
}

/// Renders `err`, attaching route and request ID from `scope` when known.
pub(crate) fn error_response(err: &AuthzError, scope: Option<&RequestScope>) -> Response {
    let route = match err {
        AuthzError::AuthorizationNotPerformed { route } => Some(route.as_str()),
        _ => scope.map(RequestScope::route),
    };
    let body = ErrorBody {
        error: err.kind(),
        message: err.public_message(),
        route,
        request_id: scope.map(RequestScope::request_id),
    };
    (err.status(), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecisionEngineError;

    #[test]
    fn only_denial_is_forbidden() {
        let denied = AuthzError::Forbidden {
            actor: "user:1".to_string(),
            action: "read".to_string(),
            resource: "document:42".to_string(),
        };
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let engine: AuthzError = DecisionEngineError::new("timeout").into();
        assert_eq!(engine.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AuthzError::context("no scope").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn denial_body_hides_triple() {
        let denied = AuthzError::Forbidden {
            actor: "user:1".to_string(),
            action: "read".to_string(),
            resource: "document:42".to_string(),
        };
        assert_eq!(denied.public_message(), "access denied");
    }

    #[test]
    fn not_performed_is_server_error() {
        let response = AuthzError::AuthorizationNotPerformed {
            route: "/forgot".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
