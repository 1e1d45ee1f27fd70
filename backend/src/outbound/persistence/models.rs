//! Internal Diesel row structs for the `articles` table.
//!
//! These types never leave the persistence adapter.

use diesel::prelude::*;

use super::schema::articles;

/// Row read from the `articles` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Insertable struct for new article records. `position` comes from the
/// column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
}

/// Changeset overwriting the mutable article fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleChangeset<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
}
