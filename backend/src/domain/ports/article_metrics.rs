//! Driven port for recording article write outcomes.
//!
//! Lets operators see how often writes succeed, fail validation or collide on
//! a title without tying the service to a metrics backend.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording article metrics.
    pub enum ArticleMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "article metrics exporter failed: {message}",
    }
}

/// Write operation being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleOperation {
    Create,
    Update,
    Delete,
}

impl ArticleOperation {
    /// Label value used by exporters.
    #[must_use]
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ArticleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// How a write operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleOutcome {
    Succeeded,
    Invalid,
    DuplicateTitle,
    NotFound,
    Failed,
}

impl ArticleOutcome {
    /// Label value used by exporters.
    #[must_use]
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Invalid => "invalid",
            Self::DuplicateTitle => "duplicate_title",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ArticleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Metrics recording port for article writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleMetrics: Send + Sync {
    /// Count one finished write operation.
    async fn record(
        &self,
        operation: ArticleOperation,
        outcome: ArticleOutcome,
    ) -> Result<(), ArticleMetricsError>;
}

/// Discards every observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpArticleMetrics;

#[async_trait]
impl ArticleMetrics for NoOpArticleMetrics {
    async fn record(
        &self,
        _operation: ArticleOperation,
        _outcome: ArticleOutcome,
    ) -> Result<(), ArticleMetricsError> {
        Ok(())
    }
}
