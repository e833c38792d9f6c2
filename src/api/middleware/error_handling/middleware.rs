use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;

use super::context::RequestContext;
use super::ErrorBoundary;
use crate::api::errors::Failure;
use crate::application::Caught;

/// Error boundary middleware layer
#[derive(Clone)]
pub struct ErrorBoundaryLayer {
    boundary: ErrorBoundary,
}

impl ErrorBoundaryLayer {
    pub fn new(boundary: ErrorBoundary) -> Self {
        Self { boundary }
    }
}

impl<S> tower::Layer<S> for ErrorBoundaryLayer
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = ErrorBoundaryService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorBoundaryService {
            inner,
            boundary: self.boundary.clone(),
        }
    }
}

/// Error boundary service wrapper
///
/// Rewrites responses carrying a parked [`Failure`] and turns handler panics
/// into internal-error responses.
#[derive(Clone)]
pub struct ErrorBoundaryService<S> {
    inner: S,
    boundary: ErrorBoundary,
}

impl<S> tower::Service<Request> for ErrorBoundaryService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let boundary = self.boundary.clone();

        Box::pin(async move {
            let context = RequestContext::from_request(&req, boundary.config());

            let result = AssertUnwindSafe(inner.call(req)).catch_unwind().await;

            match result {
                Ok(Ok(mut response)) => match response.extensions_mut().remove::<Failure>() {
                    Some(failure) => Ok(boundary.handle(failure.caught(), &context).into_response()),
                    None => Ok(response),
                },
                Ok(Err(err)) => Err(err),
                Err(payload) => {
                    Ok(boundary.handle(Caught::panic(payload.as_ref()), &context).into_response())
                }
            }
        })
    }
}
