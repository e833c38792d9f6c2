//! Log sink implementations
//!
//! This module contains the concrete sinks failure entries are handed to.

use parking_lot::Mutex;
use tracing::{error, warn};

use super::audit_types::{LogEntry, LogSink, Severity};

macro_rules! emit {
    ($macro:ident, $tag:expr, $entry:expr) => {{
        let entry = $entry;
        $macro!(
            target: "error_boundary",
            trace_id = %entry.trace_id,
            timestamp = %crate::domain::iso8601(&entry.timestamp),
            error.name = %entry.error.name,
            error.code = %entry.error.code,
            error.status = entry.error.status,
            error.message = %entry.error.message,
            error.stack = entry.error.stack.as_deref(),
            http.method = %entry.request.method,
            http.path = %entry.request.path,
            http.user_agent = entry.request.user_agent.as_deref(),
            client.address = entry.request.client_address.as_deref(),
            "{}",
            $tag
        );
    }};
}

/// Sink writing structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn warn(&self, tag: &str, entry: &LogEntry) {
        emit!(warn, tag, entry);
    }

    fn error(&self, tag: &str, entry: &LogEntry) {
        emit!(error, tag, entry);
    }
}

/// Entry captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEntry {
    pub severity: Severity,
    pub tag: String,
    pub entry: LogEntry,
}

/// In-memory sink, for tests and diagnostics
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<RecordedEntry>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RecordedEntry> {
        self.entries.lock().clone()
    }

    pub fn take(&self) -> Vec<RecordedEntry> {
        std::mem::take(&mut *self.entries.lock())
    }

    fn record(&self, severity: Severity, tag: &str, entry: &LogEntry) {
        self.entries.lock().push(RecordedEntry {
            severity,
            tag: tag.to_string(),
            entry: entry.clone(),
        });
    }
}

impl LogSink for RecordingSink {
    fn warn(&self, tag: &str, entry: &LogEntry) {
        self.record(Severity::Warn, tag, entry);
    }

    fn error(&self, tag: &str, entry: &LogEntry) {
        self.record(Severity::Error, tag, entry);
    }
}
