use serde::{Deserialize, Serialize};

use crate::error::AuthzError;

fn default_require_authorization() -> bool {
    true
}

fn default_skip_unmatched_routes() -> bool {
    true
}

fn default_request_id_header() -> String {
    "x-request-id".to_owned()
}

/// Enforcement middleware configuration.
///
/// ```
/// use authz_guard::EnforcementConfig;
///
/// let cfg = EnforcementConfig::from_value(serde_json::json!({
///     "public_routes": ["/health"]
/// }))
/// .unwrap();
///
/// assert!(cfg.require_authorization);
/// assert!(cfg.is_public_route("/health"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnforcementConfig {
    /// Run the post-handler check. Turning this off lets every response through.
    #[serde(default = "default_require_authorization")]
    pub require_authorization: bool,

    /// Leave requests that matched no route alone (the framework answers 404).
    #[serde(default = "default_skip_unmatched_routes")]
    pub skip_unmatched_routes: bool,

    /// Matched-path templates (e.g. `/health`, `/docs/{id}`) exempt up front.
    #[serde(default)]
    pub public_routes: Vec<String>,

    /// Header carrying the caller's request ID; a UUID is generated if absent.
    #[serde(default = "default_request_id_header")]
    pub request_id_header: String,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            require_authorization: default_require_authorization(),
            skip_unmatched_routes: default_skip_unmatched_routes(),
            public_routes: Vec::new(),
            request_id_header: default_request_id_header(),
        }
    }
}

impl EnforcementConfig {
    /// Parses configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::InvalidConfig`] on unknown fields or wrong types.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AuthzError> {
        serde_json::from_value(value).map_err(|e| AuthzError::InvalidConfig(e.to_string()))
    }

    /// Adds a public route template.
    #[must_use]
    pub fn with_public_route(mut self, route: impl Into<String>) -> Self {
        self.public_routes.push(route.into());
        self
    }

    /// Returns true if `route` is declared public.
    pub fn is_public_route(&self, route: &str) -> bool {
        self.public_routes.iter().any(|r| r == route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = EnforcementConfig::from_value(json!({})).unwrap();
        assert_eq!(cfg, EnforcementConfig::default());
        assert_eq!(cfg.request_id_header, "x-request-id");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = EnforcementConfig::from_value(json!({ "enforce": false })).unwrap_err();
        assert!(err.to_string().contains("invalid enforcement config"));
    }

    #[test]
    fn public_routes_match_exact_templates() {
        let cfg = EnforcementConfig::default().with_public_route("/docs/{id}");
        assert!(cfg.is_public_route("/docs/{id}"));
        assert!(!cfg.is_public_route("/docs/42"));
        assert!(!cfg.is_public_route("/docs"));
    }
}
