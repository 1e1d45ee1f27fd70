//! Article use cases.
//!
//! [`ArticleService`] implements both driving ports on top of an
//! [`ArticleRepository`]. Each write runs validation first, then existence
//! and title checks, then the store call, so a failure is reported at the
//! earliest step that detects it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ArticleMetrics, ArticleOperation, ArticleOutcome, ArticleRepository, ArticleRepositoryError,
    ArticlesCommand, ArticlesQuery, NoOpArticleMetrics,
};
use crate::domain::{
    Article, ArticleDraft, ArticleId, ArticlePayload, ArticleServiceError, Error, TitlePolicy,
};

fn map_repository_error(error: ArticleRepositoryError) -> ArticleServiceError {
    match error {
        ArticleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("article store unavailable: {message}")).into()
        }
        ArticleRepositoryError::Query { message } => {
            Error::internal(format!("article store error: {message}")).into()
        }
        ArticleRepositoryError::DuplicateTitle { title } => {
            ArticleServiceError::DuplicateTitle { title }
        }
        ArticleRepositoryError::Missing { id } => ArticleServiceError::NotFound {
            id: ArticleId::new(id),
        },
    }
}

fn outcome_of<T>(result: &Result<T, ArticleServiceError>) -> ArticleOutcome {
    match result {
        Ok(_) => ArticleOutcome::Succeeded,
        Err(ArticleServiceError::Validation(_)) => ArticleOutcome::Invalid,
        Err(ArticleServiceError::DuplicateTitle { .. }) => ArticleOutcome::DuplicateTitle,
        Err(ArticleServiceError::NotFound { .. }) => ArticleOutcome::NotFound,
        Err(ArticleServiceError::Infrastructure(_)) => ArticleOutcome::Failed,
    }
}

/// Article service implementing [`ArticlesQuery`] and [`ArticlesCommand`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use article_service::domain::{ArticleService, TitlePolicy};
/// use article_service::outbound::memory::InMemoryArticleRepository;
///
/// let service = ArticleService::new(Arc::new(InMemoryArticleRepository::new()))
///     .with_title_policy(TitlePolicy::ExcludeCurrent);
/// assert_eq!(service.title_policy(), TitlePolicy::ExcludeCurrent);
/// ```
#[derive(Clone)]
pub struct ArticleService<R> {
    repository: Arc<R>,
    metrics: Arc<dyn ArticleMetrics>,
    title_policy: TitlePolicy,
}

impl<R> ArticleService<R> {
    /// Create a service using the strict title policy and no metrics.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            metrics: Arc::new(NoOpArticleMetrics),
            title_policy: TitlePolicy::default(),
        }
    }

    /// Use `policy` when checking titles on update.
    #[must_use]
    pub fn with_title_policy(mut self, policy: TitlePolicy) -> Self {
        self.title_policy = policy;
        self
    }

    /// Record write outcomes through `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn ArticleMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Policy applied to update title checks.
    #[must_use]
    pub fn title_policy(&self) -> TitlePolicy {
        self.title_policy
    }

    async fn observe<T>(
        &self,
        operation: ArticleOperation,
        result: Result<T, ArticleServiceError>,
    ) -> Result<T, ArticleServiceError> {
        let outcome = outcome_of(&result);
        if let Err(error) = self.metrics.record(operation, outcome).await {
            warn!(%error, %operation, %outcome, "failed to record article metrics");
        }
        result
    }
}

impl<R> ArticleService<R>
where
    R: ArticleRepository,
{
    /// Whether `title` is held by an article that blocks a write to `target`.
    async fn title_is_taken(
        &self,
        title: &str,
        target: Option<&ArticleId>,
        policy: TitlePolicy,
    ) -> Result<bool, ArticleServiceError> {
        let holder = self
            .repository
            .find_by_title(title)
            .await
            .map_err(map_repository_error)?;
        Ok(holder.is_some_and(|article| policy.conflicts(article.id(), target)))
    }

    async fn find_existing(&self, id: &ArticleId) -> Result<Article, ArticleServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| ArticleServiceError::NotFound { id: id.clone() })
    }

    async fn create(&self, payload: ArticlePayload) -> Result<Article, ArticleServiceError> {
        let draft = ArticleDraft::try_from(payload).map_err(ArticleServiceError::Validation)?;

        if self
            .title_is_taken(draft.title(), None, TitlePolicy::Strict)
            .await?
        {
            warn!(title = draft.title(), "rejected article with duplicate title");
            return Err(ArticleServiceError::DuplicateTitle {
                title: draft.title().to_owned(),
            });
        }

        let article = Article::create(draft);
        self.repository
            .insert(&article)
            .await
            .map_err(map_repository_error)?;
        info!(id = %article.id(), "article created");
        Ok(article)
    }

    async fn update(
        &self,
        id: &ArticleId,
        payload: ArticlePayload,
    ) -> Result<Article, ArticleServiceError> {
        let draft = ArticleDraft::try_from(payload).map_err(ArticleServiceError::Validation)?;
        let existing = self.find_existing(id).await?;

        if self
            .title_is_taken(draft.title(), Some(id), self.title_policy)
            .await?
        {
            warn!(
                %id,
                title = draft.title(),
                policy = %self.title_policy,
                "rejected article update with duplicate title"
            );
            return Err(ArticleServiceError::DuplicateTitle {
                title: draft.title().to_owned(),
            });
        }

        let revised = existing.revise(draft);
        self.repository
            .update(&revised)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "article updated");
        Ok(revised)
    }

    async fn delete(&self, id: &ArticleId) -> Result<Article, ArticleServiceError> {
        let existing = self.find_existing(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "article deleted");
        Ok(existing)
    }
}

#[async_trait]
impl<R> ArticlesQuery for ArticleService<R>
where
    R: ArticleRepository,
{
    async fn list_articles(&self) -> Result<Vec<Article>, ArticleServiceError> {
        let articles = self
            .repository
            .list()
            .await
            .map_err(map_repository_error)?;
        debug!(count = articles.len(), "listed articles");
        Ok(articles)
    }

    async fn get_article(&self, id: &ArticleId) -> Result<Article, ArticleServiceError> {
        self.find_existing(id).await
    }
}

#[async_trait]
impl<R> ArticlesCommand for ArticleService<R>
where
    R: ArticleRepository,
{
    async fn create_article(&self, payload: ArticlePayload) -> Result<Article, ArticleServiceError> {
        let result = self.create(payload).await;
        self.observe(ArticleOperation::Create, result).await
    }

    async fn update_article(
        &self,
        id: &ArticleId,
        payload: ArticlePayload,
    ) -> Result<Article, ArticleServiceError> {
        let result = self.update(id, payload).await;
        self.observe(ArticleOperation::Update, result).await
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<Article, ArticleServiceError> {
        let result = self.delete(id).await;
        self.observe(ArticleOperation::Delete, result).await
    }
}

#[cfg(test)]
#[path = "article_service_tests.rs"]
mod tests;
