//! PostgreSQL persistence adapter using Diesel.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private; only the pool, the repository and the migration runner are
//! exported.
//!
//! # Example
//!
//! ```no_run
//! use user_service::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/users";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
};
