//! Input shapes accepted by the classifier

use std::any::Any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::domain::OperationalError;

/// A foreign error with whatever detail it carried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLike {
    pub name: String,
    pub message: Option<String>,
    pub stack: Option<String>,
}

impl ErrorLike {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: Some(message.into()),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture a standard error; the source chain stands in for a stack
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let mut chain = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(chain, "caused by: {}", cause);
            source = cause.source();
        }

        Self {
            name: std::any::type_name::<E>().to_string(),
            message: Some(err.to_string()),
            stack: (!chain.is_empty()).then_some(chain),
        }
    }

    /// Capture an `anyhow::Error` including its causes and backtrace
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self {
            name: "anyhow::Error".to_string(),
            message: Some(err.to_string()),
            stack: Some(format!("{:?}", err)),
        }
    }

    /// Capture a panic payload
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            Some((*message).to_string())
        } else {
            payload.downcast_ref::<String>().cloned()
        };

        Self {
            name: "Panic".to_string(),
            message,
            stack: None,
        }
    }
}

/// Any value that reached the error boundary
pub enum Caught<'a> {
    /// Satisfies the operational-error capability set
    Operational(&'a dyn OperationalError),
    /// A foreign error with message, name and stack
    ErrorLike(ErrorLike),
    /// Absent value
    Nullish,
    Text(Cow<'a, str>),
    Number(serde_json::Number),
    Bool(bool),
    /// Untyped structured data; checked for the operational shape first
    Json(&'a Value),
    /// Serialized form of a structured value, `None` if serialization failed
    Structured(Option<String>),
    /// A value that has no textual form, described by a type indicator
    Opaque(&'static str),
}

impl<'a> Caught<'a> {
    pub fn operational(err: &'a dyn OperationalError) -> Self {
        Caught::Operational(err)
    }

    pub fn error<E: StdError + ?Sized>(err: &E) -> Self {
        Caught::ErrorLike(ErrorLike::from_error(err))
    }

    pub fn anyhow(err: &anyhow::Error) -> Self {
        Caught::ErrorLike(ErrorLike::from_anyhow(err))
    }

    pub fn panic(payload: &(dyn Any + Send)) -> Self {
        Caught::ErrorLike(ErrorLike::from_panic(payload))
    }

    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Caught::Text(text.into())
    }

    pub fn json(value: &'a Value) -> Self {
        Caught::Json(value)
    }

    /// Attempt to serialize an arbitrary structured value
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        Caught::Structured(serde_json::to_string(value).ok())
    }
}

impl<'a, T: OperationalError> From<&'a T> for Caught<'a> {
    fn from(err: &'a T) -> Self {
        Caught::Operational(err)
    }
}

impl<'a> From<Option<&'a str>> for Caught<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Caught::Nullish, Caught::text)
    }
}

impl std::fmt::Debug for Caught<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Caught::Operational(err) => f
                .debug_struct("Operational")
                .field("code", &err.code())
                .field("status_code", &err.status_code())
                .field("trace_id", &err.trace_id())
                .finish(),
            Caught::ErrorLike(err) => f.debug_tuple("ErrorLike").field(err).finish(),
            Caught::Nullish => f.write_str("Nullish"),
            Caught::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Caught::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Caught::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Caught::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Caught::Structured(text) => f.debug_tuple("Structured").field(text).finish(),
            Caught::Opaque(indicator) => f.debug_tuple("Opaque").field(indicator).finish(),
        }
    }
}
