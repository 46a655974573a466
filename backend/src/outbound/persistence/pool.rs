//! bb8-backed pool of async Diesel PostgreSQL connections.
//!
//! Checkout never blocks the runtime and gives up after the configured
//! timeout. Pool failures surface as [`PoolError`], which repositories map to
//! their connection error variant.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Default upper bound on open connections.
pub const DEFAULT_MAX_SIZE: u32 = 10;
/// Default number of idle connections kept warm.
pub const DEFAULT_MIN_IDLE: u32 = 2;
/// Default checkout timeout.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time, or connecting failed.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool itself could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// The underlying driver message.
    pub fn message(&self) -> &str {
        match self {
            Self::Checkout { message } | Self::Build { message } => message,
        }
    }
}

/// Pool sizing and connection target.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use user_service::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://app@localhost/users")
///     .with_max_size(4)
///     .with_min_idle(None)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for `database_url` with default sizing.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(DEFAULT_MIN_IDLE),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Set the maximum number of open connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Idle connections kept warm, if any.
    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle
    }

    /// Checkout timeout.
    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Shared handle to the connection pool. Cloning is cheap.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the pool cannot be constructed, for
    /// example when warming `min_idle` connections fails.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);

        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection is available within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
