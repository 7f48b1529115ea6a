//! axum integration surface.
//!
//! This module binds the enforcement lifecycle to an axum [`Router`](axum::Router):
//! - [`enforce_authorization`] creates a [`RequestScope`](crate::RequestScope)
//!   per request and vetoes responses for requests that never authorized
//! - [`Authz`] is the extractor handlers use to authorize or skip
//! - [`authorize_route`] and [`exempt_route`] are route-level shortcuts
//! - [`AuthzError`](crate::AuthzError) renders as a JSON error response
//!
//! # Integration Flow
//!
//! ```text
//! upstream authentication inserts Principal
//!   ↓
//! enforce_authorization binds RequestScope + Authorizer
//!   ↓
//! handler: Authz::authorize(..)? or Authz::skip_authorization()?
//!   ↓
//! enforce_authorization post-check
//! ```

pub mod example_handler;
mod extract;
mod middleware;
mod response;

pub use extract::Authz;
pub use middleware::{
    authorize_route, enforce_authorization, exempt_route, Enforcement, RouterExt,
};
