//! Service entry-point: loads settings, prepares the database and the model,
//! then serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use riverwq::inbound::http::health::HealthState;
use riverwq::outbound::model_artifact::load_forest;
use riverwq::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, ValidatedSettings, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn load_settings() -> std::io::Result<ValidatedSettings> {
    let raw = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    raw.validate()
        .map_err(|err| std::io::Error::other(format!("invalid settings: {err}")))
}

async fn migrate(database_url: String) -> std::io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    info!(applied, "database schema is current");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    let settings = load_settings()?;

    migrate(settings.database_url.clone()).await?;

    let pool_config =
        PoolConfig::new(settings.database_url.as_str()).with_max_size(settings.pool_max_size);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;

    let mut config = ServerConfig::new(settings.bind_addr, pool, settings.api_key);
    match settings.model_path.as_deref() {
        Some(path) => {
            let model = load_forest(path)
                .map_err(|err| std::io::Error::other(format!("prediction model: {err}")))?;
            info!(trees = model.len(), path = %path.display(), "prediction model loaded");
            config = config.with_predictor(Arc::new(model));
        }
        None => warn!("RIVERWQ_MODEL_PATH not set; POST /predict will fail"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}
