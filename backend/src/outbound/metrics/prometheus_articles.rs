//! Prometheus adapter for article write metrics.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{ArticleMetrics, ArticleMetricsError, ArticleOperation, ArticleOutcome};

/// Prometheus-backed article write recorder.
///
/// # Metrics
///
/// - **Name**: `article_writes_total`
/// - **Type**: Counter
/// - **Labels**:
///   - `operation`: `create`, `update`, or `delete`
///   - `outcome`: `succeeded`, `invalid`, `duplicate_title`, `not_found`, or `failed`
pub struct PrometheusArticleMetrics {
    writes_total: IntCounterVec,
}

impl PrometheusArticleMetrics {
    /// Create the counter and register it with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let writes_total = IntCounterVec::new(
            Opts::new(
                "article_writes_total",
                "Article write operations by outcome",
            ),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(writes_total.clone()))?;
        Ok(Self { writes_total })
    }
}

#[async_trait]
impl ArticleMetrics for PrometheusArticleMetrics {
    async fn record(
        &self,
        operation: ArticleOperation,
        outcome: ArticleOutcome,
    ) -> Result<(), ArticleMetricsError> {
        self.writes_total
            .get_metric_with_label_values(&[operation.as_label(), outcome.as_label()])
            .map_err(|err| ArticleMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}
