use serde::{Deserialize, Serialize};

use crate::config::Environment;

/// Error boundary configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// Controls whether internal detail reaches clients and logs
    pub environment: Environment,
    /// Request headers consulted, in order, for an upstream trace id
    pub trace_id_headers: Vec<String>,
    /// Take the client address from `X-Forwarded-For` instead of the socket
    pub trust_proxy_headers: bool,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            trace_id_headers: vec!["x-trace-id".to_string(), "x-request-id".to_string()],
            trust_proxy_headers: false,
        }
    }
}

impl ErrorHandlingConfig {
    /// Create a new config with custom settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Append a header to the trace id lookup list
    pub fn with_trace_id_header(mut self, header: impl Into<String>) -> Self {
        self.trace_id_headers.push(header.into().to_ascii_lowercase());
        self
    }

    pub fn with_proxy_headers(mut self, trusted: bool) -> Self {
        self.trust_proxy_headers = trusted;
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
