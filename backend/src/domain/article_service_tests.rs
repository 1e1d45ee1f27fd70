//! Tests for the article service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockArticleMetrics, MockArticleRepository};
use crate::domain::{ErrorCode, FieldError};

fn stored(id: &str, title: &str) -> Article {
    let draft = ArticleDraft::try_from(ArticlePayload::new(title, "Body", "Ada"))
        .expect("valid fixture draft");
    Article::from_draft(ArticleId::new(id), draft)
}

#[fixture]
fn payload() -> ArticlePayload {
    ArticlePayload::new("Hello", "World", "Ada")
}

fn service(repo: MockArticleRepository) -> ArticleService<MockArticleRepository> {
    ArticleService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_persists_article_with_fresh_id(payload: ArticlePayload) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_title()
        .withf(|title| title == "Hello")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|article| article.title() == "Hello" && !article.id().as_str().is_empty())
        .times(1)
        .return_once(|_| Ok(()));

    let article = service(repo)
        .create_article(payload)
        .await
        .expect("create succeeds");

    assert_eq!(article.title(), "Hello");
    assert_eq!(article.content(), "World");
    assert_eq!(article.author(), "Ada");
}

#[tokio::test]
async fn create_rejects_missing_fields_before_touching_storage() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_title().times(0);
    repo.expect_insert().times(0);

    let error = service(repo)
        .create_article(ArticlePayload {
            title: Some("Hello".into()),
            content: None,
            author: Some(String::new()),
        })
        .await
        .expect_err("validation fails");

    match error {
        ArticleServiceError::Validation(errors) => assert_eq!(
            errors.as_slice(),
            &[FieldError::MissingContent, FieldError::MissingAuthor]
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_title(payload: ArticlePayload) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_title()
        .times(1)
        .return_once(|_| Ok(Some(stored("existing", "Hello"))));
    repo.expect_insert().times(0);

    let error = service(repo)
        .create_article(payload)
        .await
        .expect_err("duplicate title");

    assert_eq!(
        error,
        ArticleServiceError::DuplicateTitle {
            title: "Hello".into()
        }
    );
}

#[rstest]
#[tokio::test]
async fn create_reports_lost_race_as_duplicate_title(payload: ArticlePayload) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_title().return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(ArticleRepositoryError::duplicate_title("Hello")));

    let error = service(repo)
        .create_article(payload)
        .await
        .expect_err("constraint violation");

    assert!(matches!(error, ArticleServiceError::DuplicateTitle { .. }));
}

#[rstest]
#[case(ArticleRepositoryError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
#[case(ArticleRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_maps_store_failures_to_infrastructure_errors(
    #[case] failure: ArticleRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockArticleRepository::new();
    repo.expect_list().times(1).return_once(move || Err(failure));

    let error = service(repo)
        .list_articles()
        .await
        .expect_err("store failure");

    match error {
        ArticleServiceError::Infrastructure(inner) => assert_eq!(inner.code(), expected),
        other => panic!("expected infrastructure error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_returns_empty_collection_without_error() {
    let mut repo = MockArticleRepository::new();
    repo.expect_list().times(1).return_once(|| Ok(Vec::new()));

    let articles = service(repo).list_articles().await.expect("list succeeds");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn get_reports_unknown_id() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .get_article(&ArticleId::new("nope"))
        .await
        .expect_err("not found");

    assert_eq!(
        error,
        ArticleServiceError::NotFound {
            id: ArticleId::new("nope")
        }
    );
}

#[tokio::test]
async fn update_validates_before_existence() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id().times(0);

    let error = service(repo)
        .update_article(&ArticleId::new("a"), ArticlePayload::default())
        .await
        .expect_err("validation fails");

    assert!(matches!(error, ArticleServiceError::Validation(_)));
}

#[rstest]
#[tokio::test]
async fn update_reports_missing_article_before_title_check(payload: ArticlePayload) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_find_by_title().times(0);

    let error = service(repo)
        .update_article(&ArticleId::new("gone"), payload)
        .await
        .expect_err("not found");

    assert!(matches!(error, ArticleServiceError::NotFound { .. }));
}

#[rstest]
#[case(TitlePolicy::Strict, true)]
#[case(TitlePolicy::ExcludeCurrent, false)]
#[tokio::test]
async fn update_with_unchanged_title_follows_policy(
    #[case] policy: TitlePolicy,
    #[case] rejected: bool,
) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id()
        .returning(|_| Ok(Some(stored("a", "Hello"))));
    repo.expect_find_by_title()
        .returning(|_| Ok(Some(stored("a", "Hello"))));
    repo.expect_update()
        .times(usize::from(!rejected))
        .returning(|_| Ok(()));

    let result = ArticleService::new(Arc::new(repo))
        .with_title_policy(policy)
        .update_article(&ArticleId::new("a"), ArticlePayload::new("Hello", "New", "Grace"))
        .await;

    if rejected {
        assert!(matches!(
            result,
            Err(ArticleServiceError::DuplicateTitle { .. })
        ));
    } else {
        let article = result.expect("update succeeds");
        assert_eq!(article.content(), "New");
    }
}

#[tokio::test]
async fn update_rejects_title_held_by_another_article() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(stored("a", "Mine"))));
    repo.expect_find_by_title()
        .withf(|title| title == "Theirs")
        .return_once(|_| Ok(Some(stored("b", "Theirs"))));
    repo.expect_update().times(0);

    let error = ArticleService::new(Arc::new(repo))
        .with_title_policy(TitlePolicy::ExcludeCurrent)
        .update_article(&ArticleId::new("a"), ArticlePayload::new("Theirs", "C", "A"))
        .await
        .expect_err("conflict");

    assert!(matches!(error, ArticleServiceError::DuplicateTitle { .. }));
}

#[tokio::test]
async fn update_keeps_identifier_and_overwrites_fields() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(stored("a", "Old"))));
    repo.expect_find_by_title().return_once(|_| Ok(None));
    repo.expect_update()
        .withf(|article| article.id().as_str() == "a" && article.title() == "New")
        .times(1)
        .return_once(|_| Ok(()));

    let article = service(repo)
        .update_article(&ArticleId::new("a"), ArticlePayload::new("New", "Body 2", "Grace"))
        .await
        .expect("update succeeds");

    assert_eq!(article.id().as_str(), "a");
    assert_eq!(article.author(), "Grace");
}

#[tokio::test]
async fn update_reports_concurrent_delete_as_not_found() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(stored("a", "Old"))));
    repo.expect_find_by_title().return_once(|_| Ok(None));
    repo.expect_update()
        .return_once(|_| Err(ArticleRepositoryError::missing("a")));

    let error = service(repo)
        .update_article(&ArticleId::new("a"), ArticlePayload::new("New", "C", "A"))
        .await
        .expect_err("row vanished");

    assert!(matches!(error, ArticleServiceError::NotFound { .. }));
}

#[tokio::test]
async fn delete_returns_last_known_state() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(stored("a", "Bye"))));
    repo.expect_delete().times(1).return_once(|_| Ok(()));

    let article = service(repo)
        .delete_article(&ArticleId::new("a"))
        .await
        .expect("delete succeeds");

    assert_eq!(article.title(), "Bye");
}

#[tokio::test]
async fn delete_of_unknown_id_skips_store_delete() {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_delete().times(0);

    let error = service(repo)
        .delete_article(&ArticleId::new("nope"))
        .await
        .expect_err("not found");

    assert!(matches!(error, ArticleServiceError::NotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn write_outcomes_are_recorded(payload: ArticlePayload) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_title()
        .return_once(|_| Ok(Some(stored("x", "Hello"))));

    let mut metrics = MockArticleMetrics::new();
    metrics
        .expect_record()
        .with(eq(ArticleOperation::Create), eq(ArticleOutcome::DuplicateTitle))
        .times(1)
        .return_once(|_, _| Ok(()));

    let result = ArticleService::new(Arc::new(repo))
        .with_metrics(Arc::new(metrics))
        .create_article(payload)
        .await;

    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn metrics_failures_do_not_change_the_result(payload: ArticlePayload) {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_title().return_once(|_| Ok(None));
    repo.expect_insert().return_once(|_| Ok(()));

    let mut metrics = MockArticleMetrics::new();
    metrics
        .expect_record()
        .return_once(|_, _| Err(crate::domain::ports::ArticleMetricsError::export("down")));

    let article = ArticleService::new(Arc::new(repo))
        .with_metrics(Arc::new(metrics))
        .create_article(payload)
        .await
        .expect("create still succeeds");

    assert_eq!(article.title(), "Hello");
}
