//! Domain-level error type.
//!
//! Errors are transport agnostic: the HTTP adapter maps [`ErrorCode`] to a
//! status code and sends only the message to the client. The serialised form,
//! with code, trace id and details, is what gets logged.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with existing state (e.g. a duplicate email).
    Conflict,
    /// A backing service (the database) is unreachable.
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::NotFound => "Not found",
            Self::Conflict => "Conflict",
            Self::ServiceUnavailable => "Service unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Raised when deserialising an error payload with a blank message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error message must not be empty")]
pub struct EmptyErrorMessage;

/// Failure reported by the domain.
///
/// ## Invariants
/// - `message` is never blank; constructors substitute a generic message for
///   the code when given whitespace.
/// - `trace_id` is captured from the task-local [`TraceId`] at construction.
///
/// # Examples
/// ```
/// use user_service::domain::{Error, ErrorCode};
///
/// let err = Error::conflict("Email already in use by another user");
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert_eq!(err.message(), "Email already in use by another user");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Build an error for `code`, capturing the current trace identifier.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Correlation identifier of the request that produced this error.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details, e.g. the offending field.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// [`ErrorCode::InvalidRequest`] shorthand.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::NotFound`] shorthand.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::Conflict`] shorthand.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// [`ErrorCode::ServiceUnavailable`] shorthand.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`] shorthand.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = value;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = EmptyErrorMessage;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        if value.message.trim().is_empty() {
            return Err(EmptyErrorMessage);
        }
        Ok(Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        })
    }
}
