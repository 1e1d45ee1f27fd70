//! OpenAPI schema definitions for response types without a derivable schema.
//!
//! [`ArticleEnvelope`](crate::inbound::http::envelope::ArticleEnvelope) is
//! generic and serialises its code by hand, so the documented shape lives
//! here instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::inbound::http::envelope::ResponseCode`].
#[derive(ToSchema)]
#[schema(as = ResponseCode)]
pub enum ResponseCodeSchema {
    /// Operation succeeded.
    #[schema(rename = "200")]
    Success,
    /// Empty article list, or a title already in use.
    #[schema(rename = "701")]
    EmptyOrDuplicate,
    /// Unknown article on read or delete.
    #[schema(rename = "702")]
    UnknownArticle,
    /// Unknown article on update.
    #[schema(rename = "404")]
    ArticleNotFound,
    /// Missing fields or malformed body.
    #[schema(rename = "710")]
    InvalidPayload,
    /// Unexpected store failure.
    #[schema(rename = "500")]
    InternalError,
    /// Store unreachable.
    #[schema(rename = "503")]
    ServiceUnavailable,
}

/// OpenAPI schema for
/// [`ArticleEnvelope`](crate::inbound::http::envelope::ArticleEnvelope).
#[derive(ToSchema)]
#[schema(as = ArticleEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ArticleEnvelopeSchema {
    /// Application result code.
    code: ResponseCodeSchema,
    /// Human-readable outcome.
    #[schema(example = "Article saved successfully.")]
    message: String,
    /// Outcome payload: absent, `null`, one article, or a list of articles.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
    /// One message per validation failure.
    #[schema(example = json!(["Title is required."]))]
    errors: Option<Vec<String>>,
}
