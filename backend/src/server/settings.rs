//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer CLI arguments over `RIVERWQ_*` environment variables over an
//! optional configuration file. [`ServerSettings::validate`] turns the raw
//! layer into checked values the bootstrap can use directly.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use riverwq::domain::{ApiKeyHash, ApiKeyHashError};

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Raw configuration layer.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RIVERWQ")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Hex SHA-256 digest of the shared API key.
    pub api_key_hash: Option<String>,
    /// Interface to listen on.
    pub bind_host: Option<String>,
    /// Port to listen on.
    pub bind_port: Option<u16>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// JSON forest artifact for `POST /predict`.
    pub model_path: Option<PathBuf>,
}

/// Reasons the settings cannot start a server.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("RIVERWQ_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("RIVERWQ_API_KEY_HASH must be set")]
    MissingApiKeyHash,
    #[error("RIVERWQ_API_KEY_HASH is invalid: {0}")]
    InvalidApiKeyHash(#[from] ApiKeyHashError),
    #[error("bind host {host:?} is not an IP address")]
    InvalidBindHost { host: String },
    #[error("pool max size must be at least 1")]
    InvalidPoolSize,
}

/// Checked settings ready for the bootstrap.
#[derive(Debug, Clone)]
pub struct ValidatedSettings {
    pub database_url: String,
    pub api_key: ApiKeyHash,
    pub bind_addr: SocketAddr,
    pub pool_max_size: u32,
    pub model_path: Option<PathBuf>,
}

impl ServerSettings {
    /// Apply defaults and reject missing or malformed values.
    ///
    /// # Errors
    /// Returns [`SettingsError`] naming the first offending setting.
    pub fn validate(self) -> Result<ValidatedSettings, SettingsError> {
        let database_url = self
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        let api_key = ApiKeyHash::from_hex(
            self.api_key_hash
                .as_deref()
                .ok_or(SettingsError::MissingApiKeyHash)?,
        )?;
        let host = self
            .bind_host
            .unwrap_or_else(|| DEFAULT_BIND_HOST.to_owned());
        let ip: IpAddr = host
            .parse()
            .map_err(|_| SettingsError::InvalidBindHost { host: host.clone() })?;
        let pool_max_size = self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE);
        if pool_max_size == 0 {
            return Err(SettingsError::InvalidPoolSize);
        }
        Ok(ValidatedSettings {
            database_url,
            api_key,
            bind_addr: SocketAddr::new(ip, self.bind_port.unwrap_or(DEFAULT_BIND_PORT)),
            pool_max_size,
            model_path: self.model_path,
        })
    }
}
