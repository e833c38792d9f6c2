//! Error boundary for the HTTP layer
//!
//! Every failure that escapes a handler passes through here: it is
//! classified, logged in full for internal consumption and turned into a
//! sanitized client response sharing the same trace id and timestamp.
//!
//! The module is split into focused components:
//! - config.rs: Configuration structures
//! - context.rs: Request context captured for logging
//! - response.rs: Client response envelope and builder
//! - middleware.rs: HTTP middleware implementation

pub mod config;
pub mod context;
pub mod middleware;
pub mod response;

use std::sync::Arc;

pub use config::ErrorHandlingConfig;
pub use context::RequestContext;
pub use middleware::{ErrorBoundaryLayer, ErrorBoundaryService};
pub use response::{build_response, not_found_response, ClientResponse, ErrorBody, ErrorEnvelope};

use super::audit::{log_record, LogSink, TracingSink};
use crate::application::{classify_with_trace_id, Caught};

/// Terminal failure handler shared by all requests
#[derive(Clone)]
pub struct ErrorBoundary {
    config: Arc<ErrorHandlingConfig>,
    sink: Arc<dyn LogSink>,
}

impl ErrorBoundary {
    pub fn new(config: ErrorHandlingConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            config: Arc::new(config),
            sink,
        }
    }

    /// Boundary logging through `tracing`
    pub fn with_tracing(config: ErrorHandlingConfig) -> Self {
        Self::new(config, Arc::new(TracingSink))
    }

    pub fn config(&self) -> &ErrorHandlingConfig {
        &self.config
    }

    /// Classify, log and answer a failure. Never fails itself.
    pub fn handle(&self, caught: Caught<'_>, context: &RequestContext) -> ClientResponse {
        let record = classify_with_trace_id(caught, context.trace_id.as_deref());
        log_record(&record, context, self.config.environment, self.sink.as_ref());
        build_response(&record, self.config.environment)
    }

    /// Answer a request that matched no route
    pub fn not_found(&self, context: &RequestContext) -> ClientResponse {
        tracing::debug!(
            method = %context.method,
            path = %context.path,
            "No route matched"
        );
        not_found_response(&context.method, &context.path, context.trace_id.as_deref())
    }
}

impl std::fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
