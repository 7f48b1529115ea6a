//! Request-lifecycle enforcement for axum routers.
//!
//! [`enforce_authorization`] wraps every matched route:
//!
//! ```text
//! request ──► bind RequestScope (Pending)
//!                 │
//!                 ▼
//!             handler (authorize / skip_authorization)
//!                 │  AuthzError converted by IntoResponse
//!                 ▼
//!             response (Handled)
//!                 │
//!                 ▼
//!             post-check (Enforced)
//!               403 from a recorded denial ──► denial response hook, if set
//!               401 or 403                 ──► pass through
//!               authorized or exempt       ──► pass through
//!               otherwise                  ──► 500 authorization_not_performed
//! ```
//!
//! Install it last, so it wraps everything else:
//!
//! ```
//! use std::sync::Arc;
//! use axum::{routing::get, Router};
//! use authz_guard::{Authz, AuthzError, Enforcement, RouterExt, StaticPolicy};
//!
//! async fn public_page(authz: Authz) -> Result<&'static str, AuthzError> {
//!     authz.skip_authorization()?;
//!     Ok("welcome")
//! }
//!
//! let app: Router = Router::new()
//!     .route("/public", get(public_page))
//!     .require_authorization(Enforcement::new(Arc::new(StaticPolicy::new())));
//! ```

use std::fmt;
use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use crate::authorizer::Authorizer;
use crate::client::DecisionClient;
use crate::config::EnforcementConfig;
use crate::context::{EnforcementPhase, RequestScope};
use crate::decision::{Decision, DecisionRecord};
use crate::error::AuthzError;
use crate::exempt::skip_authorization;
use crate::request::RequestMeta;

use super::response::error_response;
use super::Authz;

type DenialResponder = Arc<dyn Fn(&DecisionRecord) -> Response + Send + Sync>;

/// Shared state of the enforcement middleware.
#[derive(Clone)]
pub struct Enforcement {
    authorizer: Authorizer,
    config: Arc<EnforcementConfig>,
    on_denial: Option<DenialResponder>,
}

impl Enforcement {
    /// Creates enforcement with the default configuration.
    pub fn new(client: Arc<dyn DecisionClient>) -> Self {
        Self {
            authorizer: Authorizer::new(client),
            config: Arc::new(EnforcementConfig::default()),
            on_denial: None,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EnforcementConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Replaces the response of every request whose handler propagated a
    /// denial. The default is the JSON 403 rendered by [`AuthzError`].
    ///
    /// ```
    /// use std::sync::Arc;
    /// use axum::http::StatusCode;
    /// use axum::response::IntoResponse;
    /// use authz_guard::{Enforcement, StaticPolicy};
    ///
    /// // Hide the existence of resources the caller may not read.
    /// let enforcement = Enforcement::new(Arc::new(StaticPolicy::new()))
    ///     .with_denial_response(|_| StatusCode::NOT_FOUND.into_response());
    /// ```
    #[must_use]
    pub fn with_denial_response<F>(mut self, responder: F) -> Self
    where
        F: Fn(&DecisionRecord) -> Response + Send + Sync + 'static,
    {
        self.on_denial = Some(Arc::new(responder));
        self
    }

    /// Returns the authorizer handed to handlers.
    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &EnforcementConfig {
        &self.config
    }

    fn render_denial(&self, scope: &RequestScope, status: StatusCode) -> Option<Response> {
        let responder = self.on_denial.as_ref()?;
        if status != StatusCode::FORBIDDEN {
            return None;
        }
        let state = scope.snapshot();
        let record = state.last_decision()?;
        (record.decision() == Decision::Deny).then(|| responder(record))
    }
}

impl fmt::Debug for Enforcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enforcement")
            .field("authorizer", &self.authorizer)
            .field("config", &self.config)
            .field("on_denial", &self.on_denial.is_some())
            .finish()
    }
}

/// Router integration.
pub trait RouterExt {
    /// Fails every matched request that neither authorized nor skipped
    /// authorization. Call after all routes and inner layers are added.
    #[must_use]
    fn require_authorization(self, enforcement: Enforcement) -> Self;

    /// Authorizes every matched request as `(principal, method, route)`
    /// before its handler runs. Call before
    /// [`require_authorization`](RouterExt::require_authorization).
    #[must_use]
    fn perform_route_authorization(self) -> Self;
}

impl<S> RouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn require_authorization(self, enforcement: Enforcement) -> Self {
        self.layer(middleware::from_fn_with_state(
            enforcement,
            enforce_authorization,
        ))
    }

    fn perform_route_authorization(self) -> Self {
        self.route_layer(middleware::from_fn(authorize_route))
    }
}

/// Enforcement middleware; see the module docs for the lifecycle.
pub async fn enforce_authorization(
    State(enforcement): State<Enforcement>,
    mut req: Request,
    next: Next,
) -> Response {
    let matched = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());
    let route = match matched {
        Some(route) => route,
        None if enforcement.config.skip_unmatched_routes => return next.run(req).await,
        None => req.uri().path().to_owned(),
    };

    let scope = RequestScope::new(RequestMeta {
        request_id: request_id(&req, &enforcement.config.request_id_header),
        route,
        method: req.method().to_string(),
    });

    if enforcement.config.is_public_route(scope.route()) {
        if let Err(err) = skip_authorization(&scope, Some("declared public")) {
            return error_response(&err, Some(&scope));
        }
    }

    req.extensions_mut().insert(scope.clone());
    req.extensions_mut().insert(enforcement.authorizer.clone());

    let span = tracing::info_span!(
        "authz",
        request_id = %scope.request_id(),
        route = %scope.route()
    );
    let response = next.run(req).instrument(span).await;
    scope.advance(EnforcementPhase::Handled);

    let response = match enforcement.render_denial(&scope, response.status()) {
        Some(denial) => denial,
        None => post_check(&enforcement.config, &scope, response),
    };
    scope.advance(EnforcementPhase::Enforced);
    response
}

fn post_check(config: &EnforcementConfig, scope: &RequestScope, response: Response) -> Response {
    if !config.require_authorization {
        return response;
    }

    let status = response.status();
    if signals_denial(status) {
        scope
            .log()
            .debug(format_args!("{status} denial response passed through"));
        return response;
    }

    if scope.is_satisfied() {
        return response;
    }

    let err = AuthzError::AuthorizationNotPerformed {
        route: scope.route().to_owned(),
    };
    scope.log().error(format_args!(
        "{err}; discarding {status} response (state: {:?})",
        scope.snapshot()
    ));
    error_response(&err, Some(scope))
}

fn signals_denial(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Route-level authorization; installed by
/// [`RouterExt::perform_route_authorization`].
pub async fn authorize_route(req: Request, next: Next) -> Response {
    let authz = match Authz::from_extensions(req.extensions()) {
        Ok(authz) => authz,
        Err(err) => return err.into_response(),
    };

    let route = authz.scope().route().to_owned();
    if let Err(err) = authz.authorize_request(&route).await {
        return error_response(&err, Some(authz.scope()));
    }

    next.run(req).await
}

/// Route layer exempting a single route, the declarative counterpart of
/// [`Authz::skip_authorization`].
///
/// ```
/// use axum::{middleware, routing::get, Router};
/// use authz_guard::exempt_route;
///
/// let app: Router = Router::new()
///     .route("/health", get(|| async { "ok" }).route_layer(middleware::from_fn(exempt_route)));
/// ```
pub async fn exempt_route(req: Request, next: Next) -> Response {
    let Some(scope) = req.extensions().get::<RequestScope>().cloned() else {
        return AuthzError::context("exempt_route used without the enforcement middleware")
            .into_response();
    };

    if let Err(err) = skip_authorization(&scope, Some("route marked exempt")) {
        return error_response(&err, Some(&scope));
    }

    next.run(req).await
}

fn request_id(req: &Request, header: &str) -> String {
    req.headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}
