//! Driving port for article mutations.

use async_trait::async_trait;

use crate::domain::{Article, ArticleId, ArticlePayload, ArticleServiceError};

/// Write-side use cases exposed to inbound adapters.
///
/// Payloads arrive unvalidated; implementations run surface validation first
/// and report [`ArticleServiceError::Validation`] before touching storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Validate, check title uniqueness, then store a new article.
    async fn create_article(&self, payload: ArticlePayload) -> Result<Article, ArticleServiceError>;

    /// Validate, check title uniqueness, then overwrite the article with `id`.
    async fn update_article(
        &self,
        id: &ArticleId,
        payload: ArticlePayload,
    ) -> Result<Article, ArticleServiceError>;

    /// Remove the article with `id`, returning its last known state.
    async fn delete_article(&self, id: &ArticleId) -> Result<Article, ArticleServiceError>;
}
