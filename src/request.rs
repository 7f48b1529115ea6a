/// Identifying metadata for a request under enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    /// Unique identifier for this request, used to correlate logs
    pub request_id: String,
    /// Matched route template (e.g. `/documents/{id}`)
    pub route: String,
    /// HTTP method
    pub method: String,
}

/// The authenticated actor making the request.
///
/// Upstream authentication inserts this into the request extensions; the
/// `authorize_current` and `authorize_request` shortcuts use `id` as the
/// actor identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Actor identifier handed to the policy engine (e.g. `user:1`)
    pub id: String,
    /// Display name
    pub name: String,
}

impl Principal {
    /// Creates a principal.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
