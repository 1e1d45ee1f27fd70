//! JSON response envelope shared by every article endpoint.
//!
//! ```json
//! { "code": "200", "message": "...", "data": { ... }, "errors": ["..."] }
//! ```
//!
//! `code` is an application status carried as a string and is largely
//! independent of the HTTP status. `data` is omitted, `null`, or a value
//! depending on the outcome; `errors` only appears on validation failures.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Serialize, Serializer};

/// Application-level result code.
///
/// `EmptyCollection` and `DuplicateTitle` share the wire value `"701"`;
/// clients tell them apart by message only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    EmptyCollection,
    DuplicateTitle,
    UnknownArticle,
    ArticleNotFound,
    InvalidPayload,
    InternalError,
    ServiceUnavailable,
}

impl ResponseCode {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "200",
            Self::EmptyCollection | Self::DuplicateTitle => "701",
            Self::UnknownArticle => "702",
            Self::ArticleNotFound => "404",
            Self::InvalidPayload => "710",
            Self::InternalError => "500",
            Self::ServiceUnavailable => "503",
        }
    }
}

impl Serialize for ResponseCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Message attached to every validation failure.
pub const INVALID_PAYLOAD_MESSAGE: &str = "Surface validation failed.";

/// Response body for article endpoints.
///
/// # Examples
/// ```
/// use article_service::inbound::http::envelope::{ArticleEnvelope, ResponseCode};
///
/// let body = ArticleEnvelope::<()>::null(ResponseCode::UnknownArticle, "missing");
/// let json = serde_json::to_value(&body).expect("serialise");
/// assert_eq!(json["code"], "702");
/// assert!(json["data"].is_null());
/// assert!(json.get("errors").is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ArticleEnvelope<T> {
    code: ResponseCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Option<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl<T> ArticleEnvelope<T> {
    /// Successful outcome carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            code: ResponseCode::Success,
            message: message.into(),
            data: Some(Some(data)),
            errors: None,
        }
    }

    /// Outcome without a `data` key.
    pub fn bare(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// Outcome with `data: null`.
    pub fn null(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(None),
            errors: None,
        }
    }

    /// Validation failure listing one message per problem.
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            code: ResponseCode::InvalidPayload,
            message: INVALID_PAYLOAD_MESSAGE.to_owned(),
            data: None,
            errors: Some(errors),
        }
    }

    /// Application code carried by this envelope.
    #[must_use]
    pub fn code(&self) -> ResponseCode {
        self.code
    }
}

impl<T: Serialize> ArticleEnvelope<T> {
    /// Render as a JSON response with the given transport status.
    #[must_use]
    pub fn into_response(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
