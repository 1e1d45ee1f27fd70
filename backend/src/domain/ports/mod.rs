//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod article_metrics;
mod article_repository;
mod articles_command;
mod articles_query;

#[cfg(test)]
pub use article_metrics::MockArticleMetrics;
pub use article_metrics::{
    ArticleMetrics, ArticleMetricsError, ArticleOperation, ArticleOutcome, NoOpArticleMetrics,
};
#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticleRepository, ArticleRepositoryError};
#[cfg(test)]
pub use articles_command::MockArticlesCommand;
pub use articles_command::ArticlesCommand;
#[cfg(test)]
pub use articles_query::MockArticlesQuery;
pub use articles_query::ArticlesQuery;
