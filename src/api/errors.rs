use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::{Caught, ErrorLike};
use crate::domain::AppError;

/// Handler error type.
///
/// Converting into a response parks the failure in the response extensions
/// with a bare 500 status; `ErrorBoundaryLayer` picks it up, classifies it with
/// the request context and writes the client envelope.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Expected application error
    Operational(AppError),
    /// Any other error reaching the handler boundary
    Unexpected(ErrorLike),
    /// Untyped structured value
    Value(serde_json::Value),
}

impl Failure {
    pub fn caught(&self) -> Caught<'_> {
        match self {
            Failure::Operational(err) => Caught::from(err),
            Failure::Unexpected(err) => Caught::ErrorLike(err.clone()),
            Failure::Value(value) => Caught::json(value),
        }
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Failure::Operational(err)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app_error) => Failure::Operational(app_error),
            Err(err) => Failure::Unexpected(ErrorLike::from_anyhow(&err)),
        }
    }
}

impl From<serde_json::Value> for Failure {
    fn from(value: serde_json::Value) -> Self {
        Failure::Value(value)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        Failure::from(self).into_response()
    }
}
