//! Redaction rules for client-bound error messages
//!
//! Two rule sets are evaluated per message. The safe-pattern whitelist
//! recognizes curated, generic messages that may be shown as they are. Every
//! other message is run through the sensitive-content patterns, each one
//! replacing all of its matches with [`REDACTION_TOKEN`].
//!
//! The rule tables are compiled once and shared read-only by all requests.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

/// Placeholder substituted for matched sensitive content
pub const REDACTION_TOKEN: &str = "[REDACTED]";

/// Message prefixes that are generic enough to expose unmodified
pub const SAFE_PREFIXES: [&str; 12] = [
    "Invalid input",
    "Validation failed",
    "Authentication required",
    "Access denied",
    "Resource not found",
    "Too many requests",
    "Service unavailable",
    "Unauthorized",
    "Forbidden",
    "Bad request",
    "Conflict",
    "Request timeout",
];

/// File extensions that mark a path-like token as a file reference
const FILE_EXTENSIONS: &str = "js|ts|py|java|go|rb|rs|toml|json|yaml|yml|env|config";

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("Invalid ANSI escape regex")
});

static ENGINE: Lazy<RedactionEngine> = Lazy::new(RedactionEngine::new);

/// Category of sensitive content a pattern detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensitiveKind {
    StackFrame,
    UnixPath,
    WindowsPath,
    SystemPath,
    StackHeader,
    ConnectionString,
    Password,
    Token,
    ApiKey,
    Secret,
}

impl SensitiveKind {
    fn pattern(&self) -> Cow<'static, str> {
        match self {
            SensitiveKind::StackFrame => Cow::Borrowed(r"(?i)at\s+[^\n:]+:\d+(?::\d+)?"),
            SensitiveKind::UnixPath => Cow::Owned(format!(
                r"(?i)/(?:[\w\-.]+/)+[\w\-.]+\.(?:{FILE_EXTENSIONS})"
            )),
            SensitiveKind::WindowsPath => Cow::Owned(format!(
                r"(?i)(?:[a-z]:|\\)?\\(?:[\w\-.]+\\)+[\w\-.]+\.(?:{FILE_EXTENSIONS})"
            )),
            SensitiveKind::SystemPath => Cow::Borrowed(r"(?i)/(?:etc|proc|var|usr|home)/\S*"),
            SensitiveKind::StackHeader => Cow::Borrowed(r"(?i)Error:\s+[\w\s]+\n\s+at"),
            SensitiveKind::ConnectionString => Cow::Borrowed(r"\w+://\S+"),
            SensitiveKind::Password => Cow::Borrowed(r"(?i)password[=:]\s*\S+"),
            SensitiveKind::Token => Cow::Borrowed(r"(?i)token[=:]\s*\S+"),
            SensitiveKind::ApiKey => Cow::Borrowed(r"(?i)api[_-]?key[=:]\s*\S+"),
            SensitiveKind::Secret => Cow::Borrowed(r"(?i)secret[=:]\s*\S+"),
        }
    }
}

/// Evaluation order of the sensitive patterns
const SENSITIVE_ORDER: [SensitiveKind; 10] = [
    SensitiveKind::StackFrame,
    SensitiveKind::UnixPath,
    SensitiveKind::WindowsPath,
    SensitiveKind::SystemPath,
    SensitiveKind::StackHeader,
    SensitiveKind::ConnectionString,
    SensitiveKind::Password,
    SensitiveKind::Token,
    SensitiveKind::ApiKey,
    SensitiveKind::Secret,
];

/// Compiled sensitive pattern
#[derive(Debug)]
pub struct SensitivePattern {
    pub kind: SensitiveKind,
    regex: Regex,
}

/// Outcome of running a message through the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redaction<'a> {
    /// The message matched the whitelist and was not inspected further
    Safe(&'a str),
    /// No sensitive pattern matched
    Clean(&'a str),
    /// At least one sensitive pattern matched and was replaced
    Scrubbed {
        text: String,
        hits: Vec<SensitiveKind>,
    },
}

impl Redaction<'_> {
    pub fn text(&self) -> &str {
        match self {
            Redaction::Safe(text) | Redaction::Clean(text) => text,
            Redaction::Scrubbed { text, .. } => text,
        }
    }

    pub fn is_scrubbed(&self) -> bool {
        matches!(self, Redaction::Scrubbed { .. })
    }
}

/// Ordered whitelist and sensitive-content rules
#[derive(Debug)]
pub struct RedactionEngine {
    safe: RegexSet,
    sensitive: Vec<SensitivePattern>,
}

impl RedactionEngine {
    fn new() -> Self {
        let safe = RegexSet::new(
            SAFE_PREFIXES
                .iter()
                .map(|prefix| format!("(?i)^{}", regex::escape(prefix))),
        )
        .expect("Invalid safe-pattern regex");

        let sensitive = SENSITIVE_ORDER
            .iter()
            .map(|kind| SensitivePattern {
                kind: *kind,
                regex: Regex::new(&kind.pattern()).expect("Invalid sensitive-pattern regex"),
            })
            .collect();

        Self { safe, sensitive }
    }

    /// Process-wide engine instance
    pub fn global() -> &'static RedactionEngine {
        &ENGINE
    }

    pub fn sensitive_patterns(&self) -> &[SensitivePattern] {
        &self.sensitive
    }

    /// Whether the message starts with one of the whitelisted prefixes
    pub fn is_safe(&self, message: &str) -> bool {
        self.safe.is_match(message)
    }

    /// Whitelist check first, then the sensitive patterns
    pub fn redact<'a>(&self, message: &'a str) -> Redaction<'a> {
        if self.is_safe(message) {
            return Redaction::Safe(message);
        }
        self.scrub(message)
    }

    /// Apply every sensitive pattern in order, replacing all matches
    pub fn scrub<'a>(&self, message: &'a str) -> Redaction<'a> {
        let mut text = Cow::Borrowed(message);
        let mut hits = Vec::new();

        for pattern in &self.sensitive {
            let replaced = match pattern.regex.replace_all(&text, REDACTION_TOKEN) {
                Cow::Owned(replaced) => replaced,
                Cow::Borrowed(_) => continue,
            };
            hits.push(pattern.kind);
            text = Cow::Owned(replaced);
        }

        match text {
            Cow::Borrowed(unchanged) => Redaction::Clean(unchanged),
            Cow::Owned(text) => Redaction::Scrubbed { text, hits },
        }
    }
}

/// Remove terminal color and style escape sequences
pub fn strip_ansi(message: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(message, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> &'static RedactionEngine {
        RedactionEngine::global()
    }

    #[test]
    fn test_whitelist_is_case_insensitive_prefix() {
        assert!(engine().is_safe("Validation failed: email is required"));
        assert!(engine().is_safe("validation FAILED"));
        assert!(engine().is_safe("Request timeout after 30s"));
        assert!(!engine().is_safe("The request failed: Validation failed"));
    }

    #[test]
    fn test_whitelisted_message_is_not_scrubbed() {
        let message = "Access denied for token=abc";
        assert_eq!(engine().redact(message), Redaction::Safe(message));
    }

    #[test]
    fn test_stack_frame() {
        let result = engine().scrub("failed at handler.ts:10:5");
        assert!(result.is_scrubbed());
        assert!(!result.text().contains("handler.ts"));
    }

    #[test]
    fn test_unix_and_windows_paths() {
        let result = engine().scrub("cannot load /app/src/config.json now");
        assert_eq!(result.text(), "cannot load [REDACTED] now");

        let result = engine().scrub(r"cannot load C:\Users\app\settings.yaml now");
        assert_eq!(result.text(), "cannot load [REDACTED] now");

        let result = engine().scrub(r"cannot load \\server\share\run.js now");
        assert!(result.is_scrubbed());
        assert!(!result.text().contains("share"));
    }

    #[test]
    fn test_bare_file_name_is_not_a_path() {
        assert_eq!(engine().scrub("bad value in config.json"), Redaction::Clean("bad value in config.json"));
    }

    #[test]
    fn test_system_paths() {
        let result = engine().scrub("open /etc/shadow denied");
        assert_eq!(result.text(), "open [REDACTED] denied");
        match result {
            Redaction::Scrubbed { hits, .. } => assert_eq!(hits, vec![SensitiveKind::SystemPath]),
            other => panic!("expected scrubbed, got {:?}", other),
        }
    }

    #[test]
    fn test_connection_string() {
        let result = engine().scrub("connect to postgres://admin:pw@db:5432/app failed");
        assert_eq!(result.text(), "connect to [REDACTED] failed");
    }

    #[test]
    fn test_credentials() {
        for message in [
            "password=hunter2",
            "Password: hunter2",
            "token=abc.def",
            "api_key=xyz",
            "api-key:xyz",
            "apikey=xyz",
            "SECRET=shh",
        ] {
            let result = engine().scrub(message);
            assert!(result.is_scrubbed(), "{message} should be scrubbed");
        }
    }

    #[test]
    fn test_all_patterns_run_without_short_circuit() {
        let result = engine().scrub("password=hunter2 for user at /etc/shadow");
        match result {
            Redaction::Scrubbed { text, hits } => {
                assert!(!text.contains("hunter2"));
                assert!(!text.contains("/etc/shadow"));
                assert!(hits.contains(&SensitiveKind::SystemPath));
                assert!(hits.contains(&SensitiveKind::Password));
            }
            other => panic!("expected scrubbed, got {:?}", other),
        }
    }

    #[test]
    fn test_stack_header() {
        let result = engine().scrub("Error: something broke\n    at");
        assert!(result.is_scrubbed());
    }

    #[test]
    fn test_plain_message_is_clean() {
        assert_eq!(engine().scrub("Order limit reached"), Redaction::Clean("Order limit reached"));
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m text"), "red text");
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
    }
}
