//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use riverwq::domain::ApiKeyHash;
use riverwq::domain::ports::{Predictor, UnavailablePredictor};
use riverwq::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) api_key: ApiKeyHash,
    pub(crate) predictor: Arc<dyn Predictor>,
}

impl ServerConfig {
    /// Construct a configuration without a prediction model.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, api_key: ApiKeyHash) -> Self {
        Self {
            bind_addr,
            db_pool,
            api_key,
            predictor: Arc::new(UnavailablePredictor),
        }
    }

    /// Serve `POST /predict` with the supplied model.
    #[must_use]
    pub fn with_predictor(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.predictor = predictor;
        self
    }
}
