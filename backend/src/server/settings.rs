//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from the environment (`DATABASE_URL`, `BIND_ADDR`, ...) and
//! any discovered configuration file. The service accepts no command-line
//! flags, so loading ignores the process arguments.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, PoolConfig,
};

/// Listen address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const PROGRAM_NAME: &str = "user-service";

/// Errors raised while turning raw settings into usable values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Loading from the environment or config file failed.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// `DATABASE_URL` was not provided.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// `BIND_ADDR` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
pub struct ServerSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum pooled connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections kept warm.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connection_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source cannot be parsed.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)])
            .map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The listen address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Pool configuration with defaults applied.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let timeout = self
            .db_connection_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_SIZE))
            .with_min_idle(Some(self.db_min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
            .with_connection_timeout(timeout))
    }
}
