//! Client-safe message policy built on top of the redaction engine

use super::redaction::{Redaction, RedactionEngine, SensitiveKind, REDACTION_TOKEN};

/// Generic message shown to clients whenever a message cannot be exposed
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Messages longer than this (in characters) are never exposed
pub const MAX_SAFE_MESSAGE_LENGTH: usize = 100;

/// Why the sanitizer produced its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeOutcome {
    Empty,
    Whitelisted,
    Redacted(Vec<SensitiveKind>),
    TooLong,
    Clean,
}

/// Sanitized message together with the rule that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub message: String,
    pub outcome: SanitizeOutcome,
}

impl Sanitized {
    fn fallback(outcome: SanitizeOutcome) -> Self {
        Self {
            message: GENERIC_ERROR_MESSAGE.to_string(),
            outcome,
        }
    }
}

/// Turns arbitrary error messages into strings safe for client responses.
///
/// Pure: the same input always yields the same output.
#[derive(Debug, Clone, Copy)]
pub struct MessageSanitizer {
    engine: &'static RedactionEngine,
    max_length: usize,
}

impl Default for MessageSanitizer {
    fn default() -> Self {
        Self {
            engine: RedactionEngine::global(),
            max_length: MAX_SAFE_MESSAGE_LENGTH,
        }
    }
}

impl MessageSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize and report which rule applied
    pub fn inspect(&self, message: Option<&str>) -> Sanitized {
        let message = match message {
            Some(message) if !message.trim().is_empty() => message,
            _ => return Sanitized::fallback(SanitizeOutcome::Empty),
        };

        match self.engine.redact(message) {
            // Curated strings bypass the length cap
            Redaction::Safe(safe) => Sanitized {
                message: safe.to_string(),
                outcome: SanitizeOutcome::Whitelisted,
            },
            // Any hit drops the whole message
            Redaction::Scrubbed { hits, .. } => Sanitized::fallback(SanitizeOutcome::Redacted(hits)),
            Redaction::Clean(clean) if clean.contains(REDACTION_TOKEN) => {
                Sanitized::fallback(SanitizeOutcome::Redacted(Vec::new()))
            }
            Redaction::Clean(clean) if clean.chars().count() > self.max_length => {
                Sanitized::fallback(SanitizeOutcome::TooLong)
            }
            Redaction::Clean(clean) => Sanitized {
                message: clean.to_string(),
                outcome: SanitizeOutcome::Clean,
            },
        }
    }

    pub fn sanitize(&self, message: Option<&str>) -> String {
        self.inspect(message).message
    }
}

/// Sanitize a message with the default policy
pub fn sanitize_message(message: &str) -> String {
    MessageSanitizer::default().sanitize(Some(message))
}
