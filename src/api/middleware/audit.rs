//! Internal failure logging
//!
//! Builds the detailed log entry for a canonical error record and routes it
//! to the sink at the right severity. Messages are logged in full; only the
//! stack is withheld in production.

use chrono::Utc;

pub use super::audit_loggers::{RecordedEntry, RecordingSink, TracingSink};
pub use super::audit_types::{LogEntry, LogSink, LoggedError, LoggedRequest, Severity};

use super::error_handling::RequestContext;
use crate::config::Environment;
use crate::domain::CanonicalError;

/// Warn for operational client errors, error for everything else
pub fn severity_for(record: &CanonicalError) -> Severity {
    if record.is_operational && record.http_status < 500 {
        Severity::Warn
    } else {
        Severity::Error
    }
}

pub fn build_log_entry(
    record: &CanonicalError,
    context: &RequestContext,
    environment: Environment,
) -> LogEntry {
    LogEntry {
        trace_id: record.trace_id.clone(),
        error: LoggedError {
            name: record.name.clone(),
            message: record.raw_message.clone(),
            code: record.kind,
            status: record.http_status,
            stack: if environment.is_production() {
                None
            } else {
                record.stack.clone()
            },
        },
        request: LoggedRequest {
            method: context.method.clone(),
            path: context.path.clone(),
            user_agent: context.user_agent.clone(),
            client_address: context.client_address.clone(),
        },
        timestamp: record.timestamp,
        logged_at: Utc::now(),
    }
}

/// Build the entry and hand it to the sink
pub fn log_record(
    record: &CanonicalError,
    context: &RequestContext,
    environment: Environment,
    sink: &dyn LogSink,
) -> LogEntry {
    let entry = build_log_entry(record, context, environment);
    let severity = severity_for(record);

    match severity {
        Severity::Warn => sink.warn(severity.tag(), &entry),
        Severity::Error => sink.error(severity.tag(), &entry),
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{classify, Caught, ErrorLike};
    use crate::domain::{AppError, ErrorCode};

    fn context() -> RequestContext {
        RequestContext::new("GET", "/v1/contracts")
            .with_user_agent("curl/8.0")
            .with_client_address("10.0.0.7")
    }

    #[test]
    fn test_severity_selection() {
        let forbidden = classify(Caught::from(&AppError::forbidden("Access denied")));
        assert_eq!(severity_for(&forbidden), Severity::Warn);

        let internal = classify(Caught::from(&AppError::internal("boom")));
        assert_eq!(severity_for(&internal), Severity::Error);

        let unavailable = classify(Caught::from(&AppError::service_unavailable("down")));
        assert_eq!(severity_for(&unavailable), Severity::Error);

        let flagged = classify(Caught::from(&AppError::validation("x").non_operational()));
        assert_eq!(severity_for(&flagged), Severity::Error);

        let foreign = classify(Caught::Nullish);
        assert_eq!(severity_for(&foreign), Severity::Error);
    }

    #[test]
    fn test_entry_keeps_full_message() {
        let caught = ErrorLike::new("ConnectionError", "\x1b[33mconnect postgres://root:pw@db failed\x1b[0m")
            .with_stack("stack frames");
        let record = classify(Caught::ErrorLike(caught));
        let entry = build_log_entry(&record, &context(), Environment::Development);

        assert_eq!(entry.trace_id, record.trace_id);
        assert_eq!(entry.timestamp, record.timestamp);
        assert!(entry.logged_at >= entry.timestamp);
        assert_eq!(entry.error.name, "ConnectionError");
        assert_eq!(entry.error.message, "connect postgres://root:pw@db failed");
        assert_eq!(entry.error.code, ErrorCode::Internal);
        assert_eq!(entry.error.stack.as_deref(), Some("stack frames"));
        assert_eq!(entry.request.method, "GET");
        assert_eq!(entry.request.path, "/v1/contracts");
        assert_eq!(entry.request.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(entry.request.client_address.as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn test_stack_omitted_in_production() {
        let caught = ErrorLike::new("Error", "boom").with_stack("stack frames");
        let record = classify(Caught::ErrorLike(caught));
        let entry = build_log_entry(&record, &context(), Environment::Production);
        assert_eq!(entry.error.stack, None);

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["error"].get("stack").is_none());
        assert_eq!(json["request"]["userAgent"], "curl/8.0");
        assert!(json.get("loggedAt").is_some());
    }

    #[test]
    fn test_log_record_dispatches_to_sink() {
        let sink = RecordingSink::new();

        let warn = classify(Caught::from(&AppError::not_found("Resource not found")));
        log_record(&warn, &context(), Environment::Test, &sink);

        let error = classify(Caught::text("boom"));
        log_record(&error, &context(), Environment::Test, &sink);

        let entries = sink.take();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Warn);
        assert_eq!(entries[0].tag, "Client error");
        assert_eq!(entries[1].severity, Severity::Error);
        assert_eq!(entries[1].tag, "Application error");
        assert!(sink.entries().is_empty());
    }
}
