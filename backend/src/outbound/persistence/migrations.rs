//! Embedded schema migrations.
//!
//! `diesel_migrations` only drives synchronous connections, so the run
//! happens on a blocking thread with a dedicated `PgConnection`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from `backend/migrations`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking task panicked or was cancelled.
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

fn run_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply every pending migration. Already-applied migrations are skipped, so
/// this is safe to call on every start.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&database_url))
        .await
        .map_err(|err| MigrationError::Aborted {
            message: err.to_string(),
        })??;
    info!(applied, "database schema up to date");
    Ok(())
}
