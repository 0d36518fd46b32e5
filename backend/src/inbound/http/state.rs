//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ApiKeyHash;
use crate::domain::ports::{
    CollectionsCommand, CollectionsQuery, ParametersCommand, ParametersQuery, Predictor,
    RiversCommand, RiversQuery, UsersCommand, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// River reads.
    pub rivers: Arc<dyn RiversQuery>,
    /// River writes.
    pub rivers_command: Arc<dyn RiversCommand>,
    /// Parameter reads.
    pub parameters: Arc<dyn ParametersQuery>,
    /// Parameter writes.
    pub parameters_command: Arc<dyn ParametersCommand>,
    /// Collection and analytics reads.
    pub collections: Arc<dyn CollectionsQuery>,
    /// Collection writes.
    pub collections_command: Arc<dyn CollectionsCommand>,
    /// User reads.
    pub users: Arc<dyn UsersQuery>,
    /// User registration.
    pub users_command: Arc<dyn UsersCommand>,
    /// Loaded regression model.
    pub predictor: Arc<dyn Predictor>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// River reads.
    pub rivers: Arc<dyn RiversQuery>,
    /// River writes.
    pub rivers_command: Arc<dyn RiversCommand>,
    /// Parameter reads.
    pub parameters: Arc<dyn ParametersQuery>,
    /// Parameter writes.
    pub parameters_command: Arc<dyn ParametersCommand>,
    /// Collection and analytics reads.
    pub collections: Arc<dyn CollectionsQuery>,
    /// Collection writes.
    pub collections_command: Arc<dyn CollectionsCommand>,
    /// User reads.
    pub users: Arc<dyn UsersQuery>,
    /// User registration.
    pub users_command: Arc<dyn UsersCommand>,
    /// Loaded regression model.
    pub predictor: Arc<dyn Predictor>,
    /// Digest of the shared secret expected in `X-API-Key`.
    pub api_key: Arc<ApiKeyHash>,
}

impl HttpState {
    /// Construct state from the ports bundle and the configured key digest.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use riverwq::domain::ApiKeyHash;
    /// use riverwq::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// fn build(ports: HttpStatePorts) -> HttpState {
    ///     HttpState::new(ports, ApiKeyHash::of_key("secret"))
    /// }
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts, api_key: ApiKeyHash) -> Self {
        let HttpStatePorts {
            rivers,
            rivers_command,
            parameters,
            parameters_command,
            collections,
            collections_command,
            users,
            users_command,
            predictor,
        } = ports;
        Self {
            rivers,
            rivers_command,
            parameters,
            parameters_command,
            collections,
            collections_command,
            users,
            users_command,
            predictor,
            api_key: Arc::new(api_key),
        }
    }
}
