//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ApiKeyHash;
use crate::domain::ports::{
    MockCollectionsCommand, MockCollectionsQuery, MockParametersCommand, MockParametersQuery,
    MockPredictor, MockRiversCommand, MockRiversQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::validation::{json_config, path_config};

/// Plaintext key accepted by states built here.
pub const TEST_API_KEY: &str = "test-key";

/// Mock for every driving port. Unconfigured mocks panic when called, so a
/// handler test only sets expectations on the port it exercises.
#[derive(Default)]
pub struct MockPorts {
    /// River reads.
    pub rivers: MockRiversQuery,
    /// River writes.
    pub rivers_command: MockRiversCommand,
    /// Parameter reads.
    pub parameters: MockParametersQuery,
    /// Parameter writes.
    pub parameters_command: MockParametersCommand,
    /// Collection and analytics reads.
    pub collections: MockCollectionsQuery,
    /// Collection writes.
    pub collections_command: MockCollectionsCommand,
    /// User reads.
    pub users: MockUsersQuery,
    /// User registration.
    pub users_command: MockUsersCommand,
    /// Loaded regression model.
    pub predictor: MockPredictor,
}

impl MockPorts {
    /// Build HTTP state accepting [`TEST_API_KEY`].
    pub fn into_state(self) -> HttpState {
        let ports = HttpStatePorts {
            rivers: Arc::new(self.rivers),
            rivers_command: Arc::new(self.rivers_command),
            parameters: Arc::new(self.parameters),
            parameters_command: Arc::new(self.parameters_command),
            collections: Arc::new(self.collections),
            collections_command: Arc::new(self.collections_command),
            users: Arc::new(self.users),
            users_command: Arc::new(self.users_command),
            predictor: Arc::new(self.predictor),
        };
        HttpState::new(ports, ApiKeyHash::of_key(TEST_API_KEY))
    }
}

/// State with untouched mocks guarded by the supplied key digest.
pub fn state_with_key(api_key: ApiKeyHash) -> HttpState {
    let mut state = MockPorts::default().into_state();
    state.api_key = Arc::new(api_key);
    state
}

/// App wired with the given ports plus the JSON and path error handlers.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .app_data(path_config())
}
