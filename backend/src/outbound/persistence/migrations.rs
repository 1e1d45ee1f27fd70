//! Embedded schema migrations applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::PoolError;

/// Migrations from `backend/migrations`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn run_blocking(database_url: &str) -> Result<usize, PoolError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| PoolError::checkout(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PoolError::migration(err.to_string()))?;
    Ok(applied.len())
}

/// Apply any pending migrations to the database at `database_url`.
///
/// Diesel's migration harness needs a synchronous connection, so the work
/// runs on Tokio's blocking pool.
///
/// # Errors
///
/// Returns `PoolError::Checkout` when the database is unreachable and
/// `PoolError::Migration` when a migration fails or the blocking task panics.
pub async fn run_migrations(database_url: &str) -> Result<(), PoolError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url))
        .await
        .map_err(|err| PoolError::migration(format!("migration task failed: {err}")))??;
    info!(applied, "database migrations applied");
    Ok(())
}
