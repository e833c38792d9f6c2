pub mod canonical;
pub mod error_types;

pub use canonical::{iso8601, CanonicalError, ErrorOrigin, UNKNOWN_ERROR_FALLBACK};
pub use error_types::{AppError, ErrorCode, OperationalError, OperationalRecord};
