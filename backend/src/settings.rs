//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ARTICLES_*` environment variables and config
//! files, in OrthoConfig's usual precedence. Unset values fall back to the
//! defaults documented on each accessor.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{ParseTitlePolicyError, TitlePolicy};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/db_article";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddress {
        value: String,
        source: AddrParseError,
    },
    #[error(transparent)]
    TitlePolicy(#[from] ParseTitlePolicyError),
}

/// Configuration for the article service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARTICLES")]
pub struct ArticleSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Keep articles in process memory instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Title check applied on update: `strict` or `exclude-current`.
    pub update_title_policy: Option<String>,
}

impl ArticleSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        let value = if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        value
            .parse()
            .map_err(|source| SettingsError::BindAddress { value, source })
    }

    /// Database URL, defaulting to the local `db_article` database.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Pool configuration assembled from the `pool_*` settings.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url())
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            ))
    }

    /// Update title policy, defaulting to [`TitlePolicy::Strict`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::TitlePolicy`] for unknown policy names.
    pub fn title_policy(&self) -> Result<TitlePolicy, SettingsError> {
        self.update_title_policy
            .as_deref()
            .map_or(Ok(TitlePolicy::default()), str::parse)
            .map_err(SettingsError::from)
    }
}
