//! Domain primitives, services and ports.
//!
//! Purpose: hold the article model and the rules applied to it, free of any
//! transport or storage concern. Inbound adapters drive the domain through
//! [`ports::ArticlesQuery`] and [`ports::ArticlesCommand`]; outbound adapters
//! implement [`ports::ArticleRepository`].
//!
//! Public surface:
//! - Article, ArticleId, ArticleDraft, ArticlePayload: the article model.
//! - FieldError, FieldErrors: surface validation results.
//! - ArticleService: the use-case implementation.
//! - Error, ErrorCode, ArticleServiceError: failure types.
//! - TitlePolicy: title uniqueness rule for updates.
//! - TraceId: request correlation identifier.

pub mod article;
pub mod article_service;
pub mod error;
pub mod ports;
pub mod title_policy;
pub mod trace_id;

pub use self::article::{
    Article, ArticleDraft, ArticleId, ArticlePayload, FieldError, FieldErrors,
    validate_required_fields,
};
pub use self::article_service::ArticleService;
pub use self::error::{ArticleServiceError, Error, ErrorCode, ErrorValidationError};
pub use self::title_policy::{ParseTitlePolicyError, TitlePolicy};
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
