//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use article_service::Trace;
#[cfg(debug_assertions)]
use article_service::doc::ApiDoc;
use article_service::domain::ports::{ArticleMetrics, NoOpArticleMetrics};
use article_service::inbound::http::articles;
use article_service::inbound::http::health::{HealthState, live, ready};
use article_service::inbound::http::state::HttpState;
#[cfg(feature = "metrics")]
use article_service::outbound::metrics::PrometheusArticleMetrics;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Build the article write metrics for the configured registry.
///
/// Counters are registered with the Prometheus middleware's registry so they
/// appear on `/metrics`; without a registry writes are not recorded.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
#[cfg(feature = "metrics")]
fn build_article_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn ArticleMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusArticleMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("article metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpArticleMetrics)),
    }
}

/// Build the article write metrics; always a no-op without the `metrics`
/// feature.
#[cfg(not(feature = "metrics"))]
fn build_article_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn ArticleMetrics>> {
    Ok(Arc::new(NoOpArticleMetrics))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(articles::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address, article
///   store and optional metrics.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when metric registration, binding the socket
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let metrics = build_article_metrics(&config)?;
    let http_state = build_http_state(&config, metrics);
    let ServerConfig {
        bind_addr,
        title_policy: _,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
