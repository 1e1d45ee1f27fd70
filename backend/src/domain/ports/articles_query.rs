//! Driving port for reading articles.

use async_trait::async_trait;

use crate::domain::{Article, ArticleId, ArticleServiceError};

/// Read-side use cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// Every stored article in insertion order. May be empty.
    async fn list_articles(&self) -> Result<Vec<Article>, ArticleServiceError>;

    /// The article with `id`, or [`ArticleServiceError::NotFound`].
    async fn get_article(&self, id: &ArticleId) -> Result<Article, ArticleServiceError>;
}
