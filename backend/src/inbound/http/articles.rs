//! Article HTTP handlers.
//!
//! ```text
//! GET    /articles
//! GET    /article/{id}
//! POST   /save-article
//! PATCH  /modify-article/{id}
//! DELETE /article/{id}
//! ```
//!
//! Business outcomes are answered with an [`ArticleEnvelope`]; only store
//! failures escape as [`Error`] and go through the shared fallback.

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{
    FromRequest, HttpMessage, HttpRequest, HttpResponse, delete, get, mime, patch, post, web,
};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use crate::domain::{Article, ArticleId, ArticlePayload, ArticleServiceError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ArticleEnvelope, ResponseCode};
use crate::inbound::http::schemas::ArticleEnvelopeSchema;
use crate::inbound::http::state::HttpState;

const LIST_SUCCESS: &str = "Articles retrieved successfully.";
const LIST_EMPTY: &str = "Unable to retrieve articles.";
const GET_SUCCESS: &str = "Article retrieved successfully.";
const CREATE_SUCCESS: &str = "Article saved successfully.";
const DUPLICATE_TITLE: &str = "Unable to save an article with an existing title.";
const UPDATE_SUCCESS: &str = "Article updated successfully.";
const UPDATE_NOT_FOUND: &str = "Article not found.";
const DELETE_NOT_FOUND: &str = "Unable to delete an article whose UID does not exist.";

/// Article as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleBody {
    #[schema(example = "3f2b8c1e-6a4d-4c1b-9f7e-2d5a8b0c9e11")]
    pub id: String,
    #[schema(example = "Hello")]
    pub title: String,
    #[schema(example = "First post")]
    pub content: String,
    #[schema(example = "Ada")]
    pub author: String,
}

impl From<Article> for ArticleBody {
    fn from(article: Article) -> Self {
        Self {
            id: article.id().to_string(),
            title: article.title().to_owned(),
            content: article.content().to_owned(),
            author: article.author().to_owned(),
        }
    }
}

/// Request payload for creating or modifying an article.
///
/// Every field is optional at the transport level so that missing values
/// are reported by validation rather than by the JSON parser. Numbers and
/// booleans are accepted and stored in their JSON text form. Unknown keys,
/// including any client-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ArticleRequestBody {
    #[serde(default, deserialize_with = "scalar_text")]
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schema(example = "First post")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schema(example = "Ada")]
    pub author: Option<String>,
}

/// JSON scalars accepted for a text field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}

impl From<ArticleRequestBody> for ArticlePayload {
    fn from(body: ArticleRequestBody) -> Self {
        Self {
            title: body.title,
            content: body.content,
            author: body.author,
        }
    }
}

type Envelope = ArticleEnvelope<ArticleBody>;

/// Collapse outcomes a handler has no envelope for into the fallback error.
fn unexpected(error: ArticleServiceError) -> Error {
    match error {
        ArticleServiceError::Infrastructure(inner) => inner,
        other => {
            error!(error = %other, "unhandled article outcome");
            Error::internal(format!("unhandled article outcome: {other}"))
        }
    }
}

/// Article request body extractor.
///
/// Only `application/json` (or a `+json` suffix) bodies are parsed. Any other
/// or missing content type, and an empty body, yield an empty payload so the
/// per-field validation answers. Bodies that are not valid JSON, or whose
/// fields are objects or arrays, are answered with a `710` envelope and
/// HTTP 400.
#[derive(Debug, Clone, Default)]
pub struct ArticleJson(pub ArticleRequestBody);

impl ArticleJson {
    /// Unwrap the parsed body.
    pub fn into_inner(self) -> ArticleRequestBody {
        self.0
    }

    fn parse(bytes: &[u8]) -> Result<Self, actix_web::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map(Self).map_err(|err| {
            let detail = err.to_string();
            warn!(error = %detail, "rejected malformed article payload");
            let response = Envelope::invalid(vec![detail]).into_response(StatusCode::BAD_REQUEST);
            InternalError::from_response(err, response).into()
        })
    }
}

fn is_json(req: &HttpRequest) -> bool {
    matches!(
        req.mime_type(),
        Ok(Some(media)) if media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON)
    )
}

impl FromRequest for ArticleJson {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let parse_body = is_json(req);
        let body = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = body.await?;
            if parse_body {
                Self::parse(&bytes)
            } else {
                debug!(len = bytes.len(), "ignoring non-JSON article body");
                Ok(Self::default())
            }
        })
    }
}

/// Register the article routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_articles)
        .service(get_article)
        .service(save_article)
        .service(modify_article)
        .service(delete_article);
}

/// List every stored article.
///
/// An empty store is reported as code `701` without a `data` key.
#[utoipa::path(
    get,
    path = "/articles",
    responses(
        (status = 200, description = "Articles (code 200) or empty store (code 701)", body = ArticleEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ArticleEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ArticleEnvelopeSchema)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/articles")]
pub async fn list_articles(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let articles = state
        .articles_query
        .list_articles()
        .await
        .map_err(unexpected)?;

    if articles.is_empty() {
        return Ok(Envelope::bare(ResponseCode::EmptyCollection, LIST_EMPTY)
            .into_response(StatusCode::OK));
    }

    let body: Vec<ArticleBody> = articles.into_iter().map(ArticleBody::from).collect();
    Ok(ArticleEnvelope::success(LIST_SUCCESS, body).into_response(StatusCode::OK))
}

/// Fetch one article by identifier.
#[utoipa::path(
    get,
    path = "/article/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article (code 200) or unknown id (code 702)", body = ArticleEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ArticleEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ArticleEnvelopeSchema)
    ),
    tags = ["articles"],
    operation_id = "getArticle"
)]
#[get("/article/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = ArticleId::new(path.into_inner());
    let response = match state.articles_query.get_article(&id).await {
        Ok(article) => {
            Envelope::success(GET_SUCCESS, ArticleBody::from(article)).into_response(StatusCode::OK)
        }
        Err(ArticleServiceError::NotFound { id }) => Envelope::null(
            ResponseCode::UnknownArticle,
            format!("Unable to retrieve an article with UID {id}."),
        )
        .into_response(StatusCode::OK),
        Err(other) => return Err(unexpected(other)),
    };
    Ok(response)
}

/// Create an article.
///
/// Validation failures answer code `710` with HTTP 200.
#[utoipa::path(
    post,
    path = "/save-article",
    request_body = ArticleRequestBody,
    responses(
        (status = 200, description = "Saved (200), invalid (710) or duplicate title (701)", body = ArticleEnvelopeSchema),
        (status = 400, description = "Malformed JSON body (710)", body = ArticleEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ArticleEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ArticleEnvelopeSchema)
    ),
    tags = ["articles"],
    operation_id = "saveArticle"
)]
#[post("/save-article")]
pub async fn save_article(
    state: web::Data<HttpState>,
    payload: ArticleJson,
) -> ApiResult<HttpResponse> {
    let response = match state
        .articles
        .create_article(payload.into_inner().into())
        .await
    {
        Ok(article) => Envelope::success(CREATE_SUCCESS, ArticleBody::from(article))
            .into_response(StatusCode::OK),
        Err(ArticleServiceError::Validation(errors)) => {
            Envelope::invalid(errors.messages()).into_response(StatusCode::OK)
        }
        Err(ArticleServiceError::DuplicateTitle { .. }) => {
            Envelope::null(ResponseCode::DuplicateTitle, DUPLICATE_TITLE)
                .into_response(StatusCode::OK)
        }
        Err(other) => return Err(unexpected(other)),
    };
    Ok(response)
}

/// Overwrite the title, content and author of an article.
///
/// Validation failures answer HTTP 400 and unknown ids HTTP 404.
#[utoipa::path(
    patch,
    path = "/modify-article/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    request_body = ArticleRequestBody,
    responses(
        (status = 200, description = "Updated (200) or duplicate title (701)", body = ArticleEnvelopeSchema),
        (status = 400, description = "Invalid or malformed payload (710)", body = ArticleEnvelopeSchema),
        (status = 404, description = "Unknown article (404)", body = ArticleEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ArticleEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ArticleEnvelopeSchema)
    ),
    tags = ["articles"],
    operation_id = "modifyArticle"
)]
#[patch("/modify-article/{id}")]
pub async fn modify_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: ArticleJson,
) -> ApiResult<HttpResponse> {
    let id = ArticleId::new(path.into_inner());
    let response = match state
        .articles
        .update_article(&id, payload.into_inner().into())
        .await
    {
        Ok(article) => Envelope::success(UPDATE_SUCCESS, ArticleBody::from(article))
            .into_response(StatusCode::OK),
        Err(ArticleServiceError::Validation(errors)) => {
            Envelope::invalid(errors.messages()).into_response(StatusCode::BAD_REQUEST)
        }
        Err(ArticleServiceError::NotFound { .. }) => {
            Envelope::null(ResponseCode::ArticleNotFound, UPDATE_NOT_FOUND)
                .into_response(StatusCode::NOT_FOUND)
        }
        Err(ArticleServiceError::DuplicateTitle { .. }) => {
            Envelope::null(ResponseCode::DuplicateTitle, DUPLICATE_TITLE)
                .into_response(StatusCode::OK)
        }
        Err(other) => return Err(unexpected(other)),
    };
    Ok(response)
}

/// Delete an article and return its last known state.
#[utoipa::path(
    delete,
    path = "/article/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Deleted (200) or unknown id (702)", body = ArticleEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ArticleEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ArticleEnvelopeSchema)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
#[delete("/article/{id}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = ArticleId::new(path.into_inner());
    let response = match state.articles.delete_article(&id).await {
        Ok(article) => Envelope::success(
            format!("Article {id} deleted successfully."),
            ArticleBody::from(article),
        )
        .into_response(StatusCode::OK),
        Err(ArticleServiceError::NotFound { .. }) => {
            Envelope::null(ResponseCode::UnknownArticle, DELETE_NOT_FOUND)
                .into_response(StatusCode::OK)
        }
        Err(other) => return Err(unexpected(other)),
    };
    Ok(response)
}

#[cfg(test)]
#[path = "articles_tests.rs"]
mod tests;
