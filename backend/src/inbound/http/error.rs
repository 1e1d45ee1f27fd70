//! HTTP adapter mapping for infrastructure errors.
//!
//! Store failures reach clients as the shared fallback envelope: code and
//! transport status `503` when the store is unreachable, `500` otherwise,
//! with `data: null`. The detailed message stays in the logs.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::envelope::{ArticleEnvelope, ResponseCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn response_code_for(code: ErrorCode) -> (StatusCode, ResponseCode) {
    match code {
        ErrorCode::ServiceUnavailable => {
            (StatusCode::SERVICE_UNAVAILABLE, ResponseCode::ServiceUnavailable)
        }
        ErrorCode::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, ResponseCode::InternalError),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        response_code_for(self.code()).0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code) = response_code_for(self.code());
        error!(
            status = status.as_u16(),
            trace_id = self.trace_id().unwrap_or("-"),
            detail = self.message(),
            "article request failed"
        );

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ArticleEnvelope::<Value>::null(code, self.code().default_message()))
    }
}
