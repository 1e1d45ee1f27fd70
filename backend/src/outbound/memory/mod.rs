//! In-process storage adapters.

mod in_memory_article_repository;

pub use in_memory_article_repository::InMemoryArticleRepository;
