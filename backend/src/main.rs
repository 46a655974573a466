//! Service entry-point: loads settings, prepares the database and serves the
//! users API.

use color_eyre::eyre::WrapErr;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_service::outbound::persistence::{DbPool, run_migrations};
use user_service::server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_env()?;
    let pool_config = settings.pool_config()?;
    let bind_addr = settings.bind_addr()?;

    run_migrations(pool_config.database_url())
        .await
        .wrap_err("failed to prepare database schema")?;
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to connect to database")?;

    create_server(ServerConfig::new(bind_addr, pool))
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?
        .await?;
    Ok(())
}
