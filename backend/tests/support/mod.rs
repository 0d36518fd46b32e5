//! Shared helpers for HTTP integration tests over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use riverwq::Trace;
use riverwq::domain::ports::{Predictor, UnavailablePredictor};
use riverwq::inbound::http::configure;
use riverwq::test_support::InMemoryMonitoringStore;

/// Key accepted by apps built here.
pub const API_KEY: &str = "integration-key";

/// Full API over a fresh store, without a prediction model.
pub fn app(
    store: &Arc<InMemoryMonitoringStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    app_with_predictor(store, Arc::new(UnavailablePredictor))
}

/// Full API over `store`, answering `/predict` with `predictor`.
pub fn app_with_predictor(
    store: &Arc<InMemoryMonitoringStore>,
    predictor: Arc<dyn Predictor>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(store.http_state(API_KEY, predictor)))
        .wrap(Trace)
        .configure(configure)
}
