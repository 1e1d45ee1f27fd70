//! Tests for article HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockArticlesCommand, MockArticlesQuery};
use crate::domain::{ArticleService, TRACE_ID_HEADER, TitlePolicy};
use crate::middleware::Trace;
use crate::outbound::memory::InMemoryArticleRepository;

fn in_memory_state(policy: TitlePolicy) -> HttpState {
    let service = ArticleService::new(Arc::new(InMemoryArticleRepository::new()))
        .with_title_policy(policy);
    HttpState::from_service(Arc::new(service))
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn article_json(title: &str) -> Value {
    json!({"title": title, "content": "Body", "author": "Ada"})
}

#[actix_web::test]
async fn list_reports_empty_store_without_data() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/articles")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": "701", "message": "Unable to retrieve articles."})
    );
}

#[actix_web::test]
async fn created_article_is_listed_and_fetchable() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(article_json("Hello")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["code"], "200");
    let id = created["data"]["id"].as_str().expect("generated id").to_owned();
    assert!(!id.is_empty());

    let (_, listed) = send(&app, actix_test::TestRequest::get().uri("/articles")).await;
    assert_eq!(listed["code"], "200");
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["data"][0]["id"], id.as_str());

    let (_, fetched) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/article/{id}")),
    )
    .await;
    assert_eq!(fetched["code"], "200");
    assert_eq!(
        fetched["data"],
        json!({"id": id, "title": "Hello", "content": "Body", "author": "Ada"})
    );
}

#[actix_web::test]
async fn create_ignores_client_supplied_id() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let mut payload = article_json("Hello");
    payload["id"] = json!("chosen-by-client");
    let (_, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(payload),
    )
    .await;

    assert_eq!(body["code"], "200");
    assert_ne!(body["data"]["id"], "chosen-by-client");
}

#[rstest]
#[case(json!({"content": "Body", "author": "Ada"}), vec!["Title is required."])]
#[case(
    json!({"title": "", "content": null, "author": ""}),
    vec!["Title is required.", "Content is required.", "Author is required."]
)]
#[case(json!({}), vec!["Title is required.", "Content is required.", "Author is required."])]
#[actix_web::test]
async fn create_reports_missing_fields_with_http_200(
    #[case] payload: Value,
    #[case] expected: Vec<&str>,
) {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "710");
    assert_eq!(body["message"], "Surface validation failed.");
    assert_eq!(body["errors"], json!(expected));
    assert!(body.get("data").is_none());
}

#[rstest]
#[case::missing_content_type(None)]
#[case::plain_text(Some("text/plain"))]
#[case::form(Some("application/x-www-form-urlencoded"))]
#[actix_web::test]
async fn non_json_bodies_are_validated_as_empty(#[case] content_type: Option<&str>) {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;
    let mut request = actix_test::TestRequest::post()
        .uri("/save-article")
        .set_payload(article_json("Hello").to_string());
    if let Some(value) = content_type {
        request = request.insert_header(("content-type", value));
    }

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "710");
    assert_eq!(
        body["errors"],
        json!(["Title is required.", "Content is required.", "Author is required."])
    );
}

#[actix_web::test]
async fn empty_json_body_is_validated_as_empty() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .insert_header(("content-type", "application/json")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "710");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));
}

#[rstest]
#[case(json!({"title": 42, "content": "Body", "author": "Ada"}), "42")]
#[case(json!({"title": 1.5, "content": "Body", "author": "Ada"}), "1.5")]
#[case(json!({"title": true, "content": "Body", "author": "Ada"}), "true")]
#[case(json!({"title": " ", "content": "Body", "author": "Ada"}), " ")]
#[actix_web::test]
async fn scalar_and_whitespace_titles_are_saved(
    #[case] payload: Value,
    #[case] expected_title: &str,
) {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "200");
    assert_eq!(body["data"]["title"], expected_title);
}

#[rstest]
#[case(json!({"title": {"text": "Hello"}, "content": "Body", "author": "Ada"}))]
#[case(json!({"title": ["Hello"], "content": "Body", "author": "Ada"}))]
#[actix_web::test]
async fn structured_field_values_are_rejected_with_http_400(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "710");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn malformed_json_is_rejected_with_http_400() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\": 42"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "710");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn duplicate_title_is_rejected_with_null_data() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;
    let save = || {
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(article_json("Twice"))
    };

    let (_, first) = send(&app, save()).await;
    let (status, second) = send(&app, save()).await;

    assert_eq!(first["code"], "200");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        second,
        json!({
            "code": "701",
            "message": "Unable to save an article with an existing title.",
            "data": null
        })
    );
}

#[actix_web::test]
async fn unknown_id_is_reported_with_702() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri("/article/does-not-exist"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "702");
    assert!(body["data"].is_null());
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.contains("does-not-exist"))
    );
}

#[actix_web::test]
async fn update_of_unknown_id_answers_404() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch()
            .uri("/modify-article/ghost")
            .set_json(article_json("Anything")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"code": "404", "message": "Article not found.", "data": null})
    );
}

#[actix_web::test]
async fn update_validation_answers_400() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch()
            .uri("/modify-article/ghost")
            .set_json(json!({"title": "T"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "710");
    assert_eq!(
        body["errors"],
        json!(["Content is required.", "Author is required."])
    );
}

#[rstest]
#[case(TitlePolicy::Strict, "701")]
#[case(TitlePolicy::ExcludeCurrent, "200")]
#[actix_web::test]
async fn update_keeping_title_follows_policy(
    #[case] policy: TitlePolicy,
    #[case] expected_code: &str,
) {
    let app = actix_test::init_service(test_app(in_memory_state(policy))).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(article_json("Same")),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/modify-article/{id}"))
            .set_json(json!({"title": "Same", "content": "Edited", "author": "Grace"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], expected_code);
}

#[actix_web::test]
async fn update_overwrites_fields_and_keeps_id() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(article_json("Before")),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/modify-article/{id}"))
            .set_json(json!({"title": "After", "content": "New", "author": "Grace"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "200");
    assert_eq!(
        body["data"],
        json!({"id": id, "title": "After", "content": "New", "author": "Grace"})
    );
}

#[actix_web::test]
async fn delete_returns_last_state_then_get_reports_702() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/save-article")
            .set_json(article_json("Doomed")),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let (_, deleted) = send(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/article/{id}")),
    )
    .await;
    assert_eq!(deleted["code"], "200");
    assert_eq!(deleted["data"]["title"], "Doomed");
    assert!(
        deleted["message"]
            .as_str()
            .is_some_and(|message| message.contains(&id))
    );

    let (_, fetched) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/article/{id}")),
    )
    .await;
    assert_eq!(fetched["code"], "702");
}

#[actix_web::test]
async fn delete_of_unknown_id_reports_702() {
    let app = actix_test::init_service(test_app(in_memory_state(TitlePolicy::Strict))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/article/ghost"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": "702",
            "message": "Unable to delete an article whose UID does not exist.",
            "data": null
        })
    );
}

#[rstest]
#[case(Error::service_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE, "503")]
#[case(Error::internal("relation does not exist"), StatusCode::INTERNAL_SERVER_ERROR, "500")]
#[actix_web::test]
async fn store_failures_use_the_fallback_envelope(
    #[case] failure: Error,
    #[case] expected_status: StatusCode,
    #[case] expected_code: &str,
) {
    let mut query = MockArticlesQuery::new();
    query
        .expect_list_articles()
        .times(1)
        .return_once(move || Err(ArticleServiceError::Infrastructure(failure)));
    let state = HttpState::new(Arc::new(MockArticlesCommand::new()), Arc::new(query));
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/articles").to_request(),
    )
    .await;

    assert_eq!(response.status(), expected_status);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], expected_code);
    assert!(body["data"].is_null());
    assert!(
        !body["message"]
            .as_str()
            .is_some_and(|message| message.contains("pool") || message.contains("relation"))
    );
}

#[actix_web::test]
async fn write_failures_use_the_fallback_envelope() {
    let mut command = MockArticlesCommand::new();
    command.expect_delete_article().times(1).return_once(|_| {
        Err(ArticleServiceError::Infrastructure(Error::service_unavailable(
            "connection refused",
        )))
    });
    let state = HttpState::new(Arc::new(command), Arc::new(MockArticlesQuery::new()));
    let app = actix_test::init_service(test_app(state)).await;

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/article/a")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({"code": "503", "message": "Service unavailable", "data": null})
    );
}
