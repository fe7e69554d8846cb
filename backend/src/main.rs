//! Registration service entry-point: loads settings, prepares storage, and
//! runs the HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registration::config::ServerSettings;
use registration::inbound::http::health::HealthState;
use registration::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.database_url() {
        Some(database_url) => {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("REGISTRATION_DATABASE_URL not set; registrations are kept in memory");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "registration server listening");
    server.await
}
