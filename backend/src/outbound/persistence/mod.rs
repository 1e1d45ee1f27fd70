//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain repository ports backed by PostgreSQL
//! via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures are mapped to
//!   `ArticleRepositoryError` variants.
//!
//! # Example
//!
//! ```no_run
//! use article_service::outbound::persistence::{
//!     DbPool, DieselArticleRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), article_service::outbound::persistence::PoolError> {
//! let config = PoolConfig::new("postgres://localhost:5432/db_article");
//! run_migrations(config.database_url()).await?;
//! let pool = DbPool::connect(config).await?;
//! let _repo = DieselArticleRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_article_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use migrations::{MIGRATIONS, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
