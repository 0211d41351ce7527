//! Backend entry-point: loads settings, prepares storage, and serves the REST
//! API with its OpenAPI docs.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use skillforge::inbound::http::expose_internal_causes;
use skillforge::inbound::http::health::HealthState;
use skillforge::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use skillforge::outbound::security::{BuildMode, token_settings_from_env};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    expose_internal_causes(settings.development);

    let token = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    if token.ephemeral {
        warn!("tokens issued by this process become invalid on restart");
    }

    let cors = settings.cors_policy().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(&settings, token.key).with_cors(cors);
    if let Some(url) = settings.database_url.clone() {
        let migration_url = url.clone();
        let applied = web::block(move || run_migrations(&migration_url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");

        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr(), "listening");
    server.await
}
