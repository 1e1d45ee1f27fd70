//! Process-local `ArticleRepository` for tests and database-free runs.
//!
//! Articles live in a `Vec` behind a Tokio `RwLock`, which keeps insertion
//! order for listing. Uniqueness checks and writes happen under the same
//! write guard, so two concurrent inserts can never both claim a title.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleId};

/// In-memory implementation of the [`ArticleRepository`] port.
///
/// # Examples
/// ```
/// use article_service::domain::ports::ArticleRepository;
/// use article_service::outbound::memory::InMemoryArticleRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = InMemoryArticleRepository::new();
/// assert!(repo.list().await.expect("list").is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    articles: RwLock<Vec<Article>>,
}

impl InMemoryArticleRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `articles`, in order.
    #[must_use]
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        Self {
            articles: RwLock::new(articles.into_iter().collect()),
        }
    }
}

fn title_held_elsewhere(articles: &[Article], title: &str, id: &ArticleId) -> bool {
    articles
        .iter()
        .any(|stored| stored.title() == title && stored.id() != id)
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn list(&self) -> Result<Vec<Article>, ArticleRepositoryError> {
        Ok(self.articles.read().await.clone())
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleRepositoryError> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|stored| stored.id() == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, ArticleRepositoryError> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|stored| stored.title() == title).cloned())
    }

    async fn insert(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut articles = self.articles.write().await;
        if title_held_elsewhere(&articles, article.title(), article.id()) {
            return Err(ArticleRepositoryError::duplicate_title(article.title()));
        }
        if articles.iter().any(|stored| stored.id() == article.id()) {
            return Err(ArticleRepositoryError::query(format!(
                "duplicate article id {}",
                article.id()
            )));
        }
        articles.push(article.clone());
        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut articles = self.articles.write().await;
        if title_held_elsewhere(&articles, article.title(), article.id()) {
            return Err(ArticleRepositoryError::duplicate_title(article.title()));
        }
        let slot = articles
            .iter_mut()
            .find(|stored| stored.id() == article.id())
            .ok_or_else(|| ArticleRepositoryError::missing(article.id().as_str()))?;
        *slot = article.clone();
        Ok(())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleRepositoryError> {
        let mut articles = self.articles.write().await;
        let position = articles
            .iter()
            .position(|stored| stored.id() == id)
            .ok_or_else(|| ArticleRepositoryError::missing(id.as_str()))?;
        articles.remove(position);
        Ok(())
    }
}
