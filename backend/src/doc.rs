//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every article endpoint, the health probes and the
//! envelope schemas. The document is served by Swagger UI in debug builds
//! and exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::articles::{ArticleBody, ArticleRequestBody};
use crate::inbound::http::schemas::{ArticleEnvelopeSchema, ResponseCodeSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Article service API",
        description = "CRUD interface for articles with unique titles, plus health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::save_article,
        crate::inbound::http::articles::modify_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ArticleBody,
        ArticleRequestBody,
        ArticleEnvelopeSchema,
        ResponseCodeSchema
    )),
    tags(
        (name = "articles", description = "Article storage and retrieval"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
