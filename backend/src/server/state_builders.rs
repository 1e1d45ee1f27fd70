//! Builders for the HTTP state backed by the configured article store.

use std::sync::Arc;

use actix_web::web;

use article_service::domain::ArticleService;
use article_service::domain::ports::{ArticleMetrics, ArticleRepository};
use article_service::inbound::http::state::HttpState;
use article_service::outbound::memory::InMemoryArticleRepository;
use article_service::outbound::persistence::DieselArticleRepository;
use tracing::info;

use super::ServerConfig;

fn build_service<R>(
    repository: R,
    config: &ServerConfig,
    metrics: Arc<dyn ArticleMetrics>,
) -> HttpState
where
    R: ArticleRepository + 'static,
{
    let service = ArticleService::new(Arc::new(repository))
        .with_title_policy(config.title_policy)
        .with_metrics(metrics);
    HttpState::from_service(Arc::new(service))
}

/// Build handler state using PostgreSQL when a pool is configured, otherwise
/// an in-memory store.
pub(super) fn build_http_state(
    config: &ServerConfig,
    metrics: Arc<dyn ArticleMetrics>,
) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(title_policy = %config.title_policy, "serving articles from PostgreSQL");
            build_service(DieselArticleRepository::new(pool.clone()), config, metrics)
        }
        None => {
            info!(title_policy = %config.title_policy, "serving articles from memory");
            build_service(InMemoryArticleRepository::new(), config, metrics)
        }
    };
    web::Data::new(state)
}
