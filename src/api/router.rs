use axum::{routing::get, Router};

use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::error_handling::{ErrorBoundary, ErrorBoundaryLayer};

/// Create router with the health route, the not-found fallback and the error boundary
pub fn create_router(boundary: ErrorBoundary) -> Router {
    with_error_boundary(Router::new().route("/health", get(health_handler)), boundary)
}

/// Attach the not-found fallback and the error boundary to an application router
pub fn with_error_boundary(router: Router<ErrorBoundary>, boundary: ErrorBoundary) -> Router {
    router
        .fallback(not_found_handler)
        .with_state(boundary.clone())
        .layer(ErrorBoundaryLayer::new(boundary))
}
