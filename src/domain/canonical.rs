use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::error_types::ErrorCode;

/// Fallback used when a caught value carries no usable message
pub const UNKNOWN_ERROR_FALLBACK: &str = "Unknown error";

/// Where a canonical record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorOrigin {
    /// A recognized operational error
    Operational,
    /// A foreign error value with a message, name and possibly a stack
    ErrorLike,
    /// Not an error at all: null, primitives, plain objects, opaque payloads
    Foreign,
}

/// Normalized record produced for every intercepted failure
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalError {
    pub kind: ErrorCode,
    pub http_status: u16,
    pub trace_id: String,
    pub timestamp: DateTime<Utc>,
    pub is_operational: bool,
    pub raw_message: String,
    pub name: String,
    pub stack: Option<String>,
    pub origin: ErrorOrigin,
}

impl CanonicalError {
    /// Whether the client may see this record's own code and status
    pub fn is_client_describable(&self) -> bool {
        self.origin == ErrorOrigin::Operational && self.is_operational
    }
}

/// ISO-8601 rendering with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`
pub fn iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
