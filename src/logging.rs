use std::fmt;

/// A request-bound logging interface.
///
/// `ScopeLog` is obtained from [`RequestScope::log`](crate::RequestScope::log)
/// and is lifetime-bound to the scope. Every message carries the request ID
/// and matched route as structured fields.
#[derive(Debug, Clone, Copy)]
pub struct ScopeLog<'a> {
    request_id: &'a str,
    route: &'a str,
}

impl<'a> ScopeLog<'a> {
    pub(crate) fn new(request_id: &'a str, route: &'a str) -> Self {
        Self { request_id, route }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs an info-level message.
    ///
    /// ```no_run
    /// # use authz_guard::ScopeLog;
    /// # fn example(log: ScopeLog<'_>) {
    /// log.info(format_args!("document {} served", 42));
    /// # }
    /// ```
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, route = %self.route, "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, route = %self.route, "{}", args);
    }

    /// Logs an error-level message.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(request_id = %self.request_id, route = %self.route, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, route = %self.route, "{}", args);
    }
}
