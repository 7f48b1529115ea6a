//! Example handlers demonstrating the enforcement lifecycle.
//!
//! **These examples are for documentation, tests and the demo server only.**
//! They cover each way a request can end:
//! - `GET /documents/{id}`: authorizes the current principal
//! - `GET /public`: skips authorization explicitly
//! - `GET /health`: exempted by a route layer
//! - `GET /forgot`: does neither and is rejected by enforcement

use axum::extract::{Path, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AuthzError;
use crate::request::Principal;

use super::{exempt_route, Authz};

/// Header the demo authentication layer reads the actor from.
pub const ACTOR_HEADER: &str = "x-actor";

/// A document served by [`read_document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Document number
    pub id: u64,
    /// Request ID the document was served under
    pub request_id: String,
    /// Actor the document was served to
    pub reader: String,
}

/// Serves a document after authorizing `read` on `document:{id}`.
///
/// # Errors
///
/// Propagates [`AuthzError::Forbidden`] on denial, so nothing after the
/// `authorize_current` call runs.
pub async fn read_document(
    authz: Authz,
    Path(id): Path<u64>,
) -> Result<Json<Document>, AuthzError> {
    authz
        .authorize_current("read", &format!("document:{id}"))
        .await?;

    let reader = authz
        .principal()
        .map(|p| p.id.clone())
        .unwrap_or_default();
    Ok(Json(Document {
        id,
        request_id: authz.scope().request_id().to_owned(),
        reader,
    }))
}

/// Public landing page.
///
/// # Errors
///
/// Returns [`AuthzError::Context`] only if called after the request completed.
pub async fn public_page(authz: Authz) -> Result<&'static str, AuthzError> {
    authz.skip_authorization_because("landing page")?;
    Ok("welcome")
}

/// Liveness probe, exempted by [`exempt_route`] rather than in code.
pub async fn health() -> &'static str {
    "ok"
}

/// A handler that forgot to authorize; enforcement replaces its response.
pub async fn forgotten() -> &'static str {
    "this should never reach the client"
}

/// Builds the example routes. Wrap with
/// [`RouterExt::require_authorization`](super::RouterExt::require_authorization).
pub fn document_router() -> Router {
    Router::new()
        .route("/documents/{id}", get(read_document))
        .route("/public", get(public_page))
        .route(
            "/health",
            get(health).route_layer(middleware::from_fn(exempt_route)),
        )
        .route("/forgot", get(forgotten))
}

/// Demo authentication: trusts the `x-actor` header as the principal ID.
///
/// Requests without the header continue anonymously.
pub async fn principal_from_header(mut req: Request, next: Next) -> Response {
    let actor = req
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);

    match actor {
        Some(id) if id.contains(char::is_whitespace) => {
            (StatusCode::BAD_REQUEST, "malformed actor header").into_response()
        }
        Some(id) => {
            req.extensions_mut().insert(Principal::new(id.clone(), id));
            next.run(req).await
        }
        None => next.run(req).await,
    }
}
