//! PostgreSQL-backed `ArticleRepository` implementation using Diesel.
//!
//! Title uniqueness is enforced by the `articles_title_key` index; violations
//! come back as [`ArticleRepositoryError::DuplicateTitle`] so a write that
//! lost a race with the service's pre-check is still reported as a conflict.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleDraft, ArticleId, ArticlePayload};

use super::models::{ArticleChangeset, ArticleRow, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

const TITLE_UNIQUE_INDEX: &str = "articles_title_key";

/// Diesel-backed implementation of the [`ArticleRepository`] port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArticleRepositoryError {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => ArticleRepositoryError::connection(message),
    }
}

/// Map Diesel errors to repository errors; `title` names the title being
/// written so unique violations can report it.
fn map_diesel_error(error: DieselError, title: Option<&str>) -> ArticleRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(TITLE_UNIQUE_INDEX) =>
        {
            ArticleRepositoryError::duplicate_title(title.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ArticleRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => ArticleRepositoryError::query("database query error"),
        DieselError::NotFound => ArticleRepositoryError::query("record not found"),
        _ => ArticleRepositoryError::query("database error"),
    }
}

fn map_read_error(error: DieselError) -> ArticleRepositoryError {
    map_diesel_error(error, None)
}

/// Rebuild a domain article, rejecting rows that break its invariants.
fn row_to_article(row: ArticleRow) -> Result<Article, ArticleRepositoryError> {
    let ArticleRow {
        id,
        title,
        content,
        author,
    } = row;
    let draft = ArticleDraft::try_from(ArticlePayload::new(title, content, author)).map_err(
        |errors| {
            warn!(%id, %errors, "stored article violates required fields");
            ArticleRepositoryError::query(format!("stored article {id} is invalid: {errors}"))
        },
    )?;
    Ok(Article::from_draft(ArticleId::new(id), draft))
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn list(&self) -> Result<Vec<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ArticleRow> = articles::table
            .order(articles::position.asc())
            .select(ArticleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_article).collect()
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArticleRow> = articles::table
            .find(id.as_str())
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_article).transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArticleRow> = articles::table
            .filter(articles::title.eq(title))
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_article).transpose()
    }

    async fn insert(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewArticleRow {
            id: article.id().as_str(),
            title: article.title(),
            content: article.content(),
            author: article.author(),
        };

        diesel::insert_into(articles::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(article.title())))?;

        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ArticleChangeset {
            title: article.title(),
            content: article.content(),
            author: article.author(),
        };

        let updated = diesel::update(articles::table.find(article.id().as_str()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(article.title())))?;

        if updated == 0 {
            return Err(ArticleRepositoryError::missing(article.id().as_str()));
        }
        Ok(())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(articles::table.find(id.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        if deleted == 0 {
            return Err(ArticleRepositoryError::missing(id.as_str()));
        }
        Ok(())
    }
}
