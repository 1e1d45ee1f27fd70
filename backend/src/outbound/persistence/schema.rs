//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Stored articles.
    ///
    /// `title` carries the unique index `articles_title_key`. `position` is
    /// assigned by a sequence on insert and orders listings.
    articles (id) {
        /// Primary key: hyphenated UUID v4 minted by the service.
        id -> Text,
        title -> Text,
        content -> Text,
        author -> Text,
        /// Insertion sequence number.
        position -> Int8,
    }
}
