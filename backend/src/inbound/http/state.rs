//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ArticlesCommand, ArticlesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<dyn ArticlesCommand>,
    pub articles_query: Arc<dyn ArticlesQuery>,
}

impl HttpState {
    /// Construct state from separate command and query ports.
    pub fn new(articles: Arc<dyn ArticlesCommand>, articles_query: Arc<dyn ArticlesQuery>) -> Self {
        Self {
            articles,
            articles_query,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use article_service::domain::ArticleService;
    /// use article_service::inbound::http::state::HttpState;
    /// use article_service::outbound::memory::InMemoryArticleRepository;
    ///
    /// let service = ArticleService::new(Arc::new(InMemoryArticleRepository::new()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ArticlesCommand + ArticlesQuery + 'static,
    {
        Self {
            articles: service.clone(),
            articles_query: service,
        }
    }
}
