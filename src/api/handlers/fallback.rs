use axum::extract::{Request, State};

use crate::api::middleware::error_handling::{ClientResponse, ErrorBoundary, RequestContext};

/// Fallback for requests that matched no route
pub async fn not_found_handler(
    State(boundary): State<ErrorBoundary>,
    req: Request,
) -> ClientResponse {
    let context = RequestContext::from_request(&req, boundary.config());
    boundary.not_found(&context)
}
