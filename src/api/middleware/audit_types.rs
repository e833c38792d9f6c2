//! Audit types and data structures
//!
//! This module contains the internal log record emitted for every failure
//! and the sink trait log backends implement.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ErrorCode;

/// Log level of a failure entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Error,
}

impl Severity {
    /// Tag handed to the sink alongside the entry
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Warn => "Client error",
            Severity::Error => "Application error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Error section of a log entry; full detail, never redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedError {
    pub name: String,
    pub message: String,
    pub code: ErrorCode,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Request section of a log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedRequest {
    pub method: String,
    pub path: String,
    pub user_agent: Option<String>,
    pub client_address: Option<String>,
}

/// Internal log record for one failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub trace_id: String,
    pub error: LoggedError,
    pub request: LoggedRequest,
    /// When the failure was captured; the client response carries the same instant
    pub timestamp: DateTime<Utc>,
    /// When the entry was emitted
    pub logged_at: DateTime<Utc>,
}

/// Destination for failure log entries.
///
/// Sinks are shared across concurrently handled requests.
pub trait LogSink: Send + Sync {
    fn warn(&self, tag: &str, entry: &LogEntry);

    fn error(&self, tag: &str, entry: &LogEntry);
}
