pub mod caught;
pub mod classifier;
pub mod redaction;
pub mod sanitizer;

pub use caught::{Caught, ErrorLike};
pub use classifier::{classify, classify_with_trace_id};
pub use redaction::{strip_ansi, Redaction, RedactionEngine, SensitiveKind, REDACTION_TOKEN};
pub use sanitizer::{sanitize_message, MessageSanitizer, GENERIC_ERROR_MESSAGE};
