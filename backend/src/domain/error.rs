//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the domain only decides the failure category and a message that
//! is safe to show to clients.

use std::fmt;

use crate::domain::TraceId;
use crate::domain::article::{ArticleId, FieldErrors};

/// Stable machine-readable code describing an infrastructure failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected failure occurred while serving the request.
    InternalError,
}

impl ErrorCode {
    /// Message shown to clients when no better one is supplied.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::ServiceUnavailable => "Service unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Infrastructure error payload.
///
/// Captures the trace identifier in scope at construction time so adapters
/// can echo it back to clients.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use article_service::domain::{Error, ErrorCode};
///
/// let err = Error::service_unavailable("Service unavailable");
/// assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
/// assert!(err.trace_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, substituting the code's default message when the
    /// supplied one is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.default_message().to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was built.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Replace the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Outcome of a failed article operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleServiceError {
    /// One or more required fields were missing or empty.
    #[error("invalid article payload: {0}")]
    Validation(FieldErrors),
    /// Another article already uses this title.
    #[error("an article titled {title:?} already exists")]
    DuplicateTitle { title: String },
    /// No article has this identifier.
    #[error("article {id} does not exist")]
    NotFound { id: ArticleId },
    /// The backing store failed.
    #[error(transparent)]
    Infrastructure(#[from] Error),
}
