//! Client-facing error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::sanitizer::{MessageSanitizer, GENERIC_ERROR_MESSAGE};
use crate::config::Environment;
use crate::domain::{iso8601, AppError, CanonicalError, ErrorCode, ErrorOrigin};

/// `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    pub trace_id: String,
    pub timestamp: String,
}

/// Status and body sent back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    pub status: StatusCode,
    pub body: ErrorEnvelope,
}

impl ClientResponse {
    fn internal(message: String, record: &CanonicalError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorEnvelope {
                error: ErrorBody {
                    code: ErrorCode::Internal,
                    message,
                    trace_id: record.trace_id.clone(),
                    timestamp: iso8601(&record.timestamp),
                },
            },
        }
    }
}

impl IntoResponse for ClientResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Map a canonical record onto the client response for the given environment
pub fn build_response(record: &CanonicalError, environment: Environment) -> ClientResponse {
    let sanitizer = MessageSanitizer::default();

    // Values that were never errors get the generic shape everywhere
    if record.origin == ErrorOrigin::Foreign {
        return ClientResponse::internal(GENERIC_ERROR_MESSAGE.to_string(), record);
    }

    if record.is_client_describable() {
        let status =
            StatusCode::from_u16(record.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return ClientResponse {
            status,
            body: ErrorEnvelope {
                error: ErrorBody {
                    code: record.kind,
                    message: sanitizer.sanitize(Some(record.raw_message.as_str())),
                    trace_id: record.trace_id.clone(),
                    timestamp: iso8601(&record.timestamp),
                },
            },
        };
    }

    let message = if environment.is_production() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        sanitizer.sanitize(Some(record.raw_message.as_str()))
    };
    ClientResponse::internal(message, record)
}

/// Response for a request that matched no route
pub fn not_found_response(method: &str, path: &str, trace_id: Option<&str>) -> ClientResponse {
    let error = AppError::not_found(format!("Route {} {} not found", method, path));
    let trace_id = trace_id
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    ClientResponse {
        status: StatusCode::NOT_FOUND,
        body: ErrorEnvelope {
            error: ErrorBody {
                code: ErrorCode::NotFound,
                message: error.to_string(),
                trace_id,
                timestamp: iso8601(&Utc::now()),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{classify, Caught, ErrorLike};
    use crate::domain::OperationalError;
    use serde_json::json;

    #[test]
    fn test_operational_response() {
        let err = AppError::forbidden("Access denied: missing role");
        let record = classify(Caught::from(&err));
        let response = build_response(&record, Environment::Production);

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body.error.code, ErrorCode::Forbidden);
        assert_eq!(response.body.error.message, "Access denied: missing role");
        assert_eq!(response.body.error.trace_id, err.trace_id());
    }

    #[test]
    fn test_operational_message_is_sanitized() {
        let err = AppError::validation("bad config in /app/src/settings.json");
        let record = classify(Caught::from(&err));
        let response = build_response(&record, Environment::Development);

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body.error.message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_operational_in_production_hides_message() {
        let caught = ErrorLike::new("TypeError", "Order limit reached");
        let record = classify(Caught::ErrorLike(caught));
        let response = build_response(&record, Environment::Production);

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.error.code, ErrorCode::Internal);
        assert_eq!(response.body.error.message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_operational_in_development_is_sanitized() {
        let record = classify(Caught::ErrorLike(ErrorLike::new("TypeError", "Order limit reached")));
        let response = build_response(&record, Environment::Development);
        assert_eq!(response.body.error.message, "Order limit reached");

        let record = classify(Caught::ErrorLike(ErrorLike::new(
            "Error",
            "connect postgres://root:pw@db/app refused",
        )));
        let response = build_response(&record, Environment::Development);
        assert_eq!(response.body.error.message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_flagged_non_operational_app_error() {
        let err = AppError::service_unavailable("Service unavailable").non_operational();
        let record = classify(Caught::from(&err));
        let response = build_response(&record, Environment::Production);

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.error.code, ErrorCode::Internal);
        assert_eq!(response.body.error.message, GENERIC_ERROR_MESSAGE);
        assert_eq!(response.body.error.trace_id, err.trace_id());
    }

    #[test]
    fn test_invalid_status_agrees_with_log_severity() {
        use crate::api::middleware::audit::{severity_for, Severity};

        let err = AppError::forbidden("Access denied").with_status(42);
        let record = classify(Caught::from(&err));
        let response = build_response(&record, Environment::Production);

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.error.code, ErrorCode::Internal);
        assert_eq!(severity_for(&record), Severity::Error);
    }

    #[test]
    fn test_blank_upstream_trace_id_is_replaced() {
        let value = json!({
            "code": "FORBIDDEN",
            "statusCode": 403,
            "traceId": "",
            "timestamp": "2024-05-01T10:00:00.000Z",
            "message": "Access denied"
        });
        let response = build_response(&classify(Caught::json(&value)), Environment::Production);

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert!(Uuid::parse_str(&response.body.error.trace_id).is_ok());
    }

    #[test]
    fn test_foreign_value_ignores_environment() {
        let record = classify(Caught::text("Order limit reached"));
        for environment in [Environment::Production, Environment::Development] {
            let response = build_response(&record, environment);
            assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(response.body.error.message, GENERIC_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_envelope_shape() {
        let err = AppError::not_found("Resource not found");
        let record = classify(Caught::from(&err));
        let body = serde_json::to_value(build_response(&record, Environment::Test).body).unwrap();

        assert_eq!(
            body,
            json!({
                "error": {
                    "code": "NOT_FOUND",
                    "message": "Resource not found",
                    "traceId": err.trace_id(),
                    "timestamp": iso8601(&err.timestamp()),
                }
            })
        );
    }

    #[test]
    fn test_not_found_response() {
        let response = not_found_response("GET", "/missing", Some("trace-1"));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body.error.code, ErrorCode::NotFound);
        assert_eq!(response.body.error.message, "Route GET /missing not found");
        assert_eq!(response.body.error.trace_id, "trace-1");

        let response = not_found_response("GET", "/missing", None);
        assert!(Uuid::parse_str(&response.body.error.trace_id).is_ok());
    }
}
