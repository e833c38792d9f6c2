//! Normalization of caught values into canonical error records
//!
//! Classification is total: every input shape has an arm, and no arm can fail.

use std::borrow::Cow;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::caught::{Caught, ErrorLike};
use super::redaction::strip_ansi;
use crate::domain::{
    CanonicalError, ErrorCode, ErrorOrigin, OperationalError, OperationalRecord,
    UNKNOWN_ERROR_FALLBACK,
};

/// Type indicator used when a structured value cannot be serialized
pub const UNSERIALIZABLE_INDICATOR: &str = "[object Object]";

/// Classify a caught value, generating a fresh trace id when one is needed
pub fn classify(caught: Caught<'_>) -> CanonicalError {
    classify_with_trace_id(caught, None)
}

/// Classify a caught value.
///
/// Operational errors keep their own trace id. Every other value gets
/// `trace_id` when it is present and non-empty, or a fresh UUID.
pub fn classify_with_trace_id(caught: Caught<'_>, trace_id: Option<&str>) -> CanonicalError {
    match caught {
        Caught::Operational(err) => lift_operational(err),
        Caught::ErrorLike(ErrorLike {
            name,
            message,
            stack,
        }) => foreign(
            ErrorOrigin::ErrorLike,
            name,
            message.as_deref(),
            stack,
            trace_id,
        ),
        Caught::Nullish => foreign(ErrorOrigin::Foreign, "Null", None, None, trace_id),
        Caught::Text(text) => {
            foreign(ErrorOrigin::Foreign, "String", Some(&*text), None, trace_id)
        }
        Caught::Number(number) => foreign(
            ErrorOrigin::Foreign,
            "Number",
            Some(number.to_string().as_str()),
            None,
            trace_id,
        ),
        Caught::Bool(value) => foreign(
            ErrorOrigin::Foreign,
            "Boolean",
            Some(if value { "true" } else { "false" }),
            None,
            trace_id,
        ),
        Caught::Json(value) => classify_json(value, trace_id),
        Caught::Structured(serialized) => foreign(
            ErrorOrigin::Foreign,
            "Object",
            Some(serialized.as_deref().unwrap_or(UNSERIALIZABLE_INDICATOR)),
            None,
            trace_id,
        ),
        Caught::Opaque(indicator) => {
            foreign(ErrorOrigin::Foreign, "Opaque", Some(indicator), None, trace_id)
        }
    }
}

fn classify_json(value: &Value, trace_id: Option<&str>) -> CanonicalError {
    match value {
        Value::Null => classify_with_trace_id(Caught::Nullish, trace_id),
        Value::Bool(flag) => classify_with_trace_id(Caught::Bool(*flag), trace_id),
        Value::Number(number) => classify_with_trace_id(Caught::Number(number.clone()), trace_id),
        Value::String(text) => classify_with_trace_id(Caught::text(text.as_str()), trace_id),
        Value::Object(_) | Value::Array(_) => {
            if let Some(record) = OperationalRecord::from_json(value) {
                return lift_operational(&record);
            }
            let name = if value.is_array() { "Array" } else { "Object" };
            let serialized = serde_json::to_string(value).ok();
            foreign(
                ErrorOrigin::Foreign,
                name,
                Some(serialized.as_deref().unwrap_or(UNSERIALIZABLE_INDICATOR)),
                None,
                trace_id,
            )
        }
    }
}

/// Operational errors with a status outside the 4xx/5xx range are reported as internal
fn lift_operational(err: &dyn OperationalError) -> CanonicalError {
    let (kind, http_status) = match err.status_code() {
        status @ 400..=599 => (err.code(), status),
        _ => (
            ErrorCode::Internal,
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        ),
    };

    CanonicalError {
        kind,
        http_status,
        trace_id: resolve_trace_id(Some(err.trace_id())),
        timestamp: err.timestamp(),
        is_operational: err.is_operational(),
        raw_message: clean_message(Some(&*err.message())),
        name: err.name().into_owned(),
        stack: err.stack().map(Cow::into_owned),
        origin: ErrorOrigin::Operational,
    }
}

fn foreign(
    origin: ErrorOrigin,
    name: impl Into<String>,
    message: Option<&str>,
    stack: Option<String>,
    trace_id: Option<&str>,
) -> CanonicalError {
    CanonicalError {
        kind: ErrorCode::Internal,
        http_status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        trace_id: resolve_trace_id(trace_id),
        timestamp: Utc::now(),
        is_operational: false,
        raw_message: clean_message(message),
        name: name.into(),
        stack,
        origin,
    }
}

/// Strip ANSI sequences and surrounding whitespace; never returns an empty string
pub fn clean_message(message: Option<&str>) -> String {
    let cleaned = message.map(|m| strip_ansi(m).trim().to_string());
    match cleaned {
        Some(cleaned) if !cleaned.is_empty() => cleaned,
        _ => UNKNOWN_ERROR_FALLBACK.to_string(),
    }
}

fn resolve_trace_id(trace_id: Option<&str>) -> String {
    match trace_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}
