//! Driven port for article persistence.
//!
//! Adapters translate storage failures into [`ArticleRepositoryError`] so the
//! service can tell an unreachable store from a failed query, and a unique
//! constraint violation from either.

use async_trait::async_trait;

use crate::domain::{Article, ArticleId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by article repository adapters.
    pub enum ArticleRepositoryError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } => "article store connection failed: {message}",
        /// A query failed once a connection was established.
        Query { message: String } => "article store query failed: {message}",
        /// The store's uniqueness guarantee rejected a title.
        DuplicateTitle { title: String } => "article title already stored: {title}",
        /// The targeted article does not exist.
        Missing { id: String } => "article not stored: {id}",
    }
}

/// Storage for articles.
///
/// Implementations must reject an insert or update that would leave two
/// articles with the same title, reporting
/// [`ArticleRepositoryError::DuplicateTitle`], even when the service's
/// pre-check raced with a concurrent write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Return every stored article in insertion order.
    async fn list(&self) -> Result<Vec<Article>, ArticleRepositoryError>;

    /// Fetch the article with `id`, if any.
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleRepositoryError>;

    /// Fetch the article holding `title` exactly, if any.
    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, ArticleRepositoryError>;

    /// Store a new article.
    async fn insert(&self, article: &Article) -> Result<(), ArticleRepositoryError>;

    /// Overwrite the title, content and author of an existing article.
    ///
    /// Reports [`ArticleRepositoryError::Missing`] when no row matches.
    async fn update(&self, article: &Article) -> Result<(), ArticleRepositoryError>;

    /// Remove the article with `id`.
    ///
    /// Reports [`ArticleRepositoryError::Missing`] when no row matches.
    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleRepositoryError>;
}
