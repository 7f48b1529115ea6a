//! Handler-facing authorization API.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Extensions;

use crate::authorizer::Authorizer;
use crate::context::RequestScope;
use crate::error::AuthzError;
use crate::exempt;
use crate::request::Principal;

/// Authorization handle for the current request.
///
/// Extracted from the request extensions placed there by
/// [`enforce_authorization`](super::enforce_authorization). Extraction fails
/// with [`AuthzError::Context`] (a 500) when the middleware is not installed,
/// so a handler can never silently run without enforcement.
///
/// Cloning shares the underlying request scope; hand clones to sub-tasks
/// spawned while handling the request.
///
/// # Examples
///
/// ```
/// use axum::extract::Path;
/// use authz_guard::{Authz, AuthzError};
///
/// async fn read_document(authz: Authz, Path(id): Path<u64>) -> Result<String, AuthzError> {
///     authz.authorize_current("read", &format!("document:{id}")).await?;
///     Ok(format!("document {id}"))
/// }
///
/// async fn landing_page(authz: Authz) -> Result<&'static str, AuthzError> {
///     authz.skip_authorization()?;
///     Ok("welcome")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authz {
    authorizer: Authorizer,
    scope: RequestScope,
    principal: Option<Principal>,
}

impl Authz {
    /// Resolves the handle from request extensions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Context`] if no request scope or authorizer is
    /// bound, i.e. the enforcement middleware did not run for this request.
    pub fn from_extensions(extensions: &Extensions) -> Result<Self, AuthzError> {
        let scope = extensions.get::<RequestScope>().cloned().ok_or_else(|| {
            AuthzError::context("no request scope bound; is the enforcement middleware installed?")
        })?;
        let authorizer = extensions
            .get::<Authorizer>()
            .cloned()
            .ok_or_else(|| AuthzError::context("no authorizer bound to the request"))?;

        Ok(Self {
            authorizer,
            scope,
            principal: extensions.get::<Principal>().cloned(),
        })
    }

    /// Returns the request scope.
    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// Returns the authenticated principal, if upstream authentication set one.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Authorizes an explicit `(actor, action, resource)` triple.
    ///
    /// # Errors
    ///
    /// See [`Authorizer::authorize`]. A denial is [`AuthzError::Forbidden`];
    /// propagate it with `?` so the handler stops here.
    pub async fn authorize(
        &self,
        actor: &str,
        action: &str,
        resource: &str,
    ) -> Result<(), AuthzError> {
        self.authorizer
            .authorize(&self.scope, actor, action, resource)
            .await
    }

    /// Authorizes the current principal for `action` on `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Context`] if no principal is present, otherwise
    /// as [`Authz::authorize`].
    pub async fn authorize_current(&self, action: &str, resource: &str) -> Result<(), AuthzError> {
        let actor = self.current_actor()?;
        self.authorize(actor, action, resource).await
    }

    /// Authorizes the current principal, using the HTTP method as the action.
    ///
    /// # Errors
    ///
    /// As [`Authz::authorize_current`].
    pub async fn authorize_request(&self, resource: &str) -> Result<(), AuthzError> {
        let actor = self.current_actor()?;
        self.authorize(actor, self.scope.method(), resource).await
    }

    /// Marks the request exempt. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Context`] if the request has already completed.
    pub fn skip_authorization(&self) -> Result<(), AuthzError> {
        exempt::skip_authorization(&self.scope, None)
    }

    /// Marks the request exempt, recording why.
    ///
    /// # Errors
    ///
    /// As [`Authz::skip_authorization`].
    pub fn skip_authorization_because(&self, reason: &str) -> Result<(), AuthzError> {
        exempt::skip_authorization(&self.scope, Some(reason))
    }

    fn current_actor(&self) -> Result<&str, AuthzError> {
        self.principal
            .as_ref()
            .map(|p| p.id.as_str())
            .ok_or_else(|| AuthzError::context("no authenticated principal for this request"))
    }
}

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = AuthzError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_extensions(&parts.extensions)
    }
}
