//! Diagnostic values: a `Result<T>` alias over a structured, chainable
//! `Error`. No stack traces — call sites add context by wrapping, so the
//! chain itself *is* the trace.

use std::fmt;

/// A message plus an optional inner cause. Composing `Error::wrap(msg,
/// cause)` yields a `Display` of the form `"{msg}: {cause}"`, recursively.
#[derive(Debug)]
pub struct Error {
    message: String,
    cause: Option<Box<Error>>,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn wrap(message: impl Into<String>, cause: Error) -> Self {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// The innermost message in the chain, with no wrapping context.
    pub fn root_message(&self) -> &str {
        match &self.cause {
            Some(c) => c.root_message(),
            None => &self.message,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn std::error::Error + 'static))
    }
}

pub type JsonResult<T> = Result<T, Error>;

/// Wraps a failing `Result`'s error with an outer message, preserving the
/// inner error as its cause. Used by every parser/tokenizer frame so the
/// final chain reads `"Failed parsing X at loc Y: <inner>"`.
pub trait Context<T> {
    fn context(self, message: impl Into<String>) -> JsonResult<T>;
}

impl<T> Context<T> for JsonResult<T> {
    fn context(self, message: impl Into<String>) -> JsonResult<T> {
        self.map_err(|cause| Error::wrap(message, cause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_formats_as_message_colon_cause() {
        let inner = Error::new("invalid character '+' at location Ln:1, Col:5");
        let outer = Error::wrap("Failed parsing number", inner);
        assert_eq!(
            outer.to_string(),
            "Failed parsing number: invalid character '+' at location Ln:1, Col:5"
        );
    }

    #[test]
    fn context_wraps_err_variant_only() {
        let ok: JsonResult<u32> = Ok(42);
        assert_eq!(ok.context("unreachable").unwrap(), 42);

        let err: JsonResult<u32> = Err(Error::new("boom"));
        let wrapped = err.context("outer").unwrap_err();
        assert_eq!(wrapped.to_string(), "outer: boom");
    }

    #[test]
    fn root_message_unwraps_the_full_chain() {
        let e = Error::wrap("a", Error::wrap("b", Error::new("c")));
        assert_eq!(e.root_message(), "c");
    }
}
