//! # error_boundary - Error Normalization for Service Boundaries
//!
//! Turns any failure reaching the edge of a service into a sanitized client
//! response and a detailed internal log entry, without leaking stack traces,
//! file paths, credentials or connection strings to callers in production.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Error codes, the operational error type and the canonical record
//! - **Application**: Redaction rules, message sanitizer and classifier
//! - **API**: Response builder, audit logging and axum middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use error_boundary::{
//!     api::middleware::audit::TracingSink,
//!     application::Caught,
//!     ErrorBoundary, ErrorHandlingConfig, RequestContext,
//! };
//!
//! let boundary = ErrorBoundary::new(ErrorHandlingConfig::default(), Arc::new(TracingSink));
//! let context = RequestContext::new("GET", "/v1/contracts").with_trace_id("req-1");
//! let response = boundary.handle(Caught::text("connection refused"), &context);
//! assert_eq!(response.status.as_u16(), 500);
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;

// Re-export key types explicitly to avoid ambiguity
pub use api::middleware::error_handling::{
    ClientResponse, ErrorBoundary, ErrorBoundaryLayer, ErrorHandlingConfig, RequestContext,
};
pub use api::Failure;
pub use application::{classify, sanitize_message, Caught};
pub use config::{Config, Environment};
pub use domain::{AppError, CanonicalError, ErrorCode, OperationalError};
