//! Article entity and surface validation.
//!
//! An [`Article`] can only be built from an [`ArticleDraft`], and a draft
//! only exists once [`validate_required_fields`] reports nothing missing.
//! Identifiers are minted by the service and never accepted from clients.

use std::fmt;

use uuid::Uuid;

/// Stable article identifier.
///
/// Identifiers minted here are hyphenated UUID v4 strings. Lookups accept
/// any string, so a path segment that was never minted simply resolves to
/// nothing.
///
/// # Examples
/// ```
/// use article_service::domain::ArticleId;
///
/// let id = ArticleId::new("legacy-id");
/// assert_eq!(id.as_str(), "legacy-id");
/// assert_ne!(ArticleId::random(), ArticleId::random());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier received from a request path or a stored row.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A required field reported missing by surface validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// `title` was absent, null, or empty.
    #[error("Title is required.")]
    MissingTitle,
    /// `content` was absent, null, or empty.
    #[error("Content is required.")]
    MissingContent,
    /// `author` was absent, null, or empty.
    #[error("Author is required.")]
    MissingAuthor,
}

/// Ordered collection of surface validation failures.
///
/// Order is always title, content, author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Whether validation found nothing missing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the individual failures.
    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Render one human-readable message per failure.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

/// Unvalidated article fields as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl ArticlePayload {
    /// Build a payload with every field present.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            author: Some(author.into()),
        }
    }
}

fn is_missing(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Check that `title`, `content` and `author` are present and non-empty.
///
/// Whitespace counts as content: `" "` is a valid title.
///
/// Returns one error per missing field in the order title, content, author.
/// An empty result means the payload is well formed.
///
/// # Examples
/// ```
/// use article_service::domain::{ArticlePayload, FieldError, validate_required_fields};
///
/// let payload = ArticlePayload {
///     title: None,
///     content: Some("Body".into()),
///     author: Some("".into()),
/// };
/// assert_eq!(
///     validate_required_fields(&payload).as_slice(),
///     &[FieldError::MissingTitle, FieldError::MissingAuthor]
/// );
///
/// let spaced = ArticlePayload::new(" ", "Body", "Ada");
/// assert!(validate_required_fields(&spaced).is_empty());
/// ```
#[must_use]
pub fn validate_required_fields(payload: &ArticlePayload) -> FieldErrors {
    let checks = [
        (payload.title.as_deref(), FieldError::MissingTitle),
        (payload.content.as_deref(), FieldError::MissingContent),
        (payload.author.as_deref(), FieldError::MissingAuthor),
    ];
    FieldErrors(
        checks
            .into_iter()
            .filter(|(value, _)| is_missing(*value))
            .map(|(_, error)| error)
            .collect(),
    )
}

/// Validated article fields without an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: String,
    content: String,
    author: String,
}

impl ArticleDraft {
    /// Validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Validated content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Validated author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl TryFrom<ArticlePayload> for ArticleDraft {
    type Error = FieldErrors;

    fn try_from(payload: ArticlePayload) -> Result<Self, Self::Error> {
        let errors = validate_required_fields(&payload);
        match (payload.title, payload.content, payload.author) {
            (Some(title), Some(content), Some(author)) if errors.is_empty() => Ok(Self {
                title,
                content,
                author,
            }),
            _ => Err(errors),
        }
    }
}

/// Persisted article.
///
/// ## Invariants
/// - `title`, `content` and `author` are non-empty.
/// - `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    id: ArticleId,
    title: String,
    content: String,
    author: String,
}

impl Article {
    /// Assign a freshly minted identifier to a validated draft.
    #[must_use]
    pub fn create(draft: ArticleDraft) -> Self {
        Self::from_draft(ArticleId::random(), draft)
    }

    /// Rebuild an article from an existing identifier and validated fields.
    #[must_use]
    pub fn from_draft(id: ArticleId, draft: ArticleDraft) -> Self {
        let ArticleDraft {
            title,
            content,
            author,
        } = draft;
        Self {
            id,
            title,
            content,
            author,
        }
    }

    /// Overwrite title, content and author, keeping the identifier.
    #[must_use]
    pub fn revise(self, draft: ArticleDraft) -> Self {
        Self::from_draft(self.id, draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &ArticleId {
        &self.id
    }

    /// Unique title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Author name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }
}
