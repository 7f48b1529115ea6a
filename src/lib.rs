//! Request-lifecycle authorization enforcement.
//!
//! Every request that reaches a handler must either seek an authorization
//! decision or be explicitly exempted before its response leaves the process.
//! This crate provides:
//! - **Per-request state**: [`RequestAuthState`] inside a shared [`RequestScope`]
//! - **Decision boundary**: the [`DecisionClient`] trait over an external policy engine
//! - **Handler API**: [`Authz::authorize`] (fails closed) and [`Authz::skip_authorization`]
//! - **Enforcement**: [`enforce_authorization`] middleware that turns a
//!   forgotten check into a loud 500 instead of a silent 200
//!
//! # Error kinds
//!
//! | kind | status | meaning |
//! |---|---|---|
//! | `forbidden` | 403 | the engine denied |
//! | `decision_engine` | 500 | the engine failed to decide |
//! | `context` | 500 | API used outside an active request |
//! | `authorization_not_performed` | 500 | handler neither authorized nor skipped |
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use axum::{extract::Path, routing::get, Router};
//! use authz_guard::{Authz, AuthzError, Enforcement, RouterExt, StaticPolicy};
//!
//! async fn read_document(authz: Authz, Path(id): Path<u64>) -> Result<String, AuthzError> {
//!     authz.authorize("user:1", "read", &format!("document:{id}")).await?;
//!     Ok(format!("document {id}"))
//! }
//!
//! let policy = StaticPolicy::new().allow("user:1", "read", "document:42");
//!
//! let app: Router = Router::new()
//!     .route("/documents/{id}", get(read_document))
//!     .require_authorization(Enforcement::new(Arc::new(policy)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod authorizer;
mod client;
mod config;
mod context;
mod decision;
mod error;
mod exempt;
mod logging;
mod request;
mod state;
pub mod web;

pub use authorizer::Authorizer;
pub use client::{DecisionClient, StaticPolicy, WILDCARD};
pub use config::EnforcementConfig;
pub use context::{EnforcementPhase, RequestScope};
pub use decision::{Decision, DecisionRecord, DecisionRequest};
pub use error::{AuthzError, DecisionEngineError};
pub use exempt::skip_authorization;
pub use logging::ScopeLog;
pub use request::{Principal, RequestMeta};
pub use state::RequestAuthState;
pub use web::{
    authorize_route, enforce_authorization, exempt_route, Authz, Enforcement, RouterExt,
};
