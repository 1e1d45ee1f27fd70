//! HTTP inbound adapter exposing the article REST endpoints.

pub mod articles;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
