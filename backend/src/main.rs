#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
//! Article service entry-point: loads settings, prepares the article store,
//! and serves the REST endpoints, health probes and OpenAPI docs.

mod server;

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use article_service::inbound::http::health::HealthState;
use article_service::outbound::persistence::{DbPool, run_migrations};
use article_service::settings::ArticleSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ArticleSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let title_policy = settings.title_policy().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr).with_title_policy(title_policy);
    if !settings.in_memory {
        config = config.with_db_pool(connect_store(&settings).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("articles")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "article service listening");
    server.await
}

/// Apply pending migrations and open the connection pool.
///
/// # Errors
/// Returns [`std::io::Error`] when the database is unreachable or a
/// migration fails; the service does not start without its store.
async fn connect_store(settings: &ArticleSettings) -> std::io::Result<DbPool> {
    let outcome = match run_migrations(settings.database_url()).await {
        Ok(()) => DbPool::connect(settings.pool_config()).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(pool) => {
            info!("connected to article database");
            Ok(pool)
        }
        Err(e) => {
            error!(error = %e, "failed to connect to article database");
            Err(std::io::Error::other(e))
        }
    }
}

/// Build Prometheus middleware, logging and discarding construction errors.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make_metrics: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make_metrics() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "failed to configure Prometheus metrics; continuing without them");
            None
        }
    }
}
