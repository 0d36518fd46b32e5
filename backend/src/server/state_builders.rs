//! Builders wiring Diesel repositories into the domain services.

use std::sync::Arc;

use actix_web::web;

use riverwq::domain::{CollectionService, ParameterService, RiverService, UserService};
use riverwq::inbound::http::state::{HttpState, HttpStatePorts};
use riverwq::outbound::persistence::{
    DbPool, DieselCollectionRepository, DieselParameterRepository, DieselRiverRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Repositories sharing one pool.
struct Repositories {
    rivers: Arc<DieselRiverRepository>,
    parameters: Arc<DieselParameterRepository>,
    collections: Arc<DieselCollectionRepository>,
    users: Arc<DieselUserRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            rivers: Arc::new(DieselRiverRepository::new(pool.clone())),
            parameters: Arc::new(DieselParameterRepository::new(pool.clone())),
            collections: Arc::new(DieselCollectionRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
        }
    }
}

/// Build the shared HTTP state from the server configuration.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let Repositories {
        rivers,
        parameters,
        collections,
        users,
    } = Repositories::new(&config.db_pool);

    let river_service = Arc::new(RiverService::new(
        rivers.clone(),
        parameters.clone(),
        collections.clone(),
    ));
    let parameter_service = Arc::new(ParameterService::new(parameters.clone()));
    let collection_service = Arc::new(CollectionService::new(rivers, parameters, collections));
    let user_service = Arc::new(UserService::new(users));

    let ports = HttpStatePorts {
        rivers: river_service.clone(),
        rivers_command: river_service,
        parameters: parameter_service.clone(),
        parameters_command: parameter_service,
        collections: collection_service.clone(),
        collections_command: collection_service,
        users: user_service.clone(),
        users_command: user_service,
        predictor: config.predictor.clone(),
    };
    web::Data::new(HttpState::new(ports, config.api_key.clone()))
}
