//! Document server demonstration.
//!
//! Serves the example routes behind the enforcement middleware:
//!
//! ```text
//! curl -H 'x-actor: user:1' localhost:3000/documents/42   # 200
//! curl -H 'x-actor: user:2' localhost:3000/documents/42   # 403
//! curl localhost:3000/public                              # 200
//! curl localhost:3000/forgot                              # 500, names /forgot
//! ```
//!
//! Run with: `cargo run --example document_server`

use std::sync::Arc;

use authz_guard::web::example_handler::{document_router, principal_from_header};
use authz_guard::{Enforcement, EnforcementConfig, RouterExt, StaticPolicy};
use axum::middleware;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let policy = StaticPolicy::new()
        .allow("user:1", "read", "document:42")
        .allow("admin:1", "*", "*");

    let config = EnforcementConfig::from_value(serde_json::json!({
        "public_routes": [],
        "request_id_header": "x-request-id"
    }))?;

    let app = document_router()
        .require_authorization(Enforcement::new(Arc::new(policy)).with_config(config))
        .layer(middleware::from_fn(principal_from_header));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
