//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed article repository using Diesel
//! - **memory**: process-local article repository
//! - **metrics**: Prometheus-backed metrics exporters (feature-gated)
//!
//! Adapters translate between domain types and storage representations. They
//! contain no business logic.

pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
