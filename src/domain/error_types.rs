//! Operational error types
//!
//! This module provides the error code taxonomy shared by every failure that
//! crosses the service boundary, the `AppError` type raised by application code,
//! and the `OperationalError` capability trait used to recognize operational
//! errors regardless of their concrete representation.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error codes exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized,
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
    #[serde(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    #[serde(rename = "RATE_LIMIT")]
    RateLimited,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::Validation,
        ErrorCode::NotFound,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::Internal,
        ErrorCode::ServiceUnavailable,
        ErrorCode::RateLimited,
    ];

    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Internal => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::RateLimited => "RATE_LIMIT",
        }
    }

    /// Parse the wire representation back into a code
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == value)
    }

    /// Conventional HTTP status for errors of this kind
    pub fn default_status(&self) -> StatusCode {
        match self {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability set shared by every operational error.
///
/// Any type exposing a code, a status code, a trace id and a timestamp is
/// treated as operational by the classifier, whatever subsystem produced it.
pub trait OperationalError {
    fn code(&self) -> ErrorCode;

    fn status_code(&self) -> u16;

    fn trace_id(&self) -> &str;

    fn timestamp(&self) -> DateTime<Utc>;

    fn message(&self) -> Cow<'_, str>;

    fn is_operational(&self) -> bool {
        true
    }

    /// Type name recorded in internal logs
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("AppError")
    }

    fn stack(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// Application-raised error that is expected during normal request handling
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    message: String,
    code: ErrorCode,
    status_code: u16,
    trace_id: String,
    timestamp: DateTime<Utc>,
    is_operational: bool,
    stack: Option<String>,
}

impl AppError {
    /// Create an operational error with the default 500 status
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        let backtrace = Backtrace::capture();
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            message: message.into(),
            code,
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            trace_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            is_operational: true,
            stack,
        }
    }

    /// Override the HTTP status code
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Mark the error as a programming error rather than an expected failure
    pub fn non_operational(mut self) -> Self {
        self.is_operational = false;
        self
    }

    fn with_default_status(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(message, code).with_status(code.default_status().as_u16())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::Validation)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::NotFound)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::Unauthorized)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::Forbidden)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::Internal)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::ServiceUnavailable)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::with_default_status(message, ErrorCode::RateLimited)
    }
}

impl OperationalError for AppError {
    fn code(&self) -> ErrorCode {
        self.code
    }

    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn trace_id(&self) -> &str {
        &self.trace_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.message)
    }

    fn is_operational(&self) -> bool {
        self.is_operational
    }

    fn stack(&self) -> Option<Cow<'_, str>> {
        self.stack.as_deref().map(Cow::Borrowed)
    }
}

/// Operational error received as structured data, e.g. from another subsystem
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalRecord {
    pub code: ErrorCode,
    pub status_code: u16,
    pub trace_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub is_operational: Option<bool>,
}

impl OperationalRecord {
    /// Recognize an operational error by shape.
    ///
    /// Returns `None` unless the value carries a known `code`, a valid
    /// `statusCode`, a `traceId` and an RFC 3339 `timestamp`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let record = Self::deserialize(value).ok()?;
        StatusCode::from_u16(record.status_code).ok()?;
        Some(record)
    }
}

impl OperationalError for OperationalRecord {
    fn code(&self) -> ErrorCode {
        self.code
    }

    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn trace_id(&self) -> &str {
        &self.trace_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.message.as_deref().unwrap_or_default())
    }

    fn is_operational(&self) -> bool {
        self.is_operational.unwrap_or(true)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_deref().unwrap_or("AppError"))
    }

    fn stack(&self) -> Option<Cow<'_, str>> {
        self.stack.as_deref().map(Cow::Borrowed)
    }
}
