//! Shared-secret gate for write endpoints.
//!
//! Handlers that create rivers, collections or users take an [`ApiKeyGuard`]
//! argument; extraction fails with `401 unauthorized` unless the request
//! carries an `X-API-Key` header whose digest matches the configured one.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Proof that the request presented a valid API key.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyGuard;

fn check(req: &HttpRequest) -> Result<ApiKeyGuard, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let Some(header) = req.headers().get(API_KEY_HEADER) else {
        warn!(path = req.path(), "request rejected: API key missing");
        return Err(Error::unauthorized("API key required"));
    };
    let candidate = header.to_str().unwrap_or_default();
    if state.api_key.verify(candidate) {
        Ok(ApiKeyGuard)
    } else {
        warn!(path = req.path(), "request rejected: API key mismatch");
        Err(Error::unauthorized("invalid API key"))
    }
}

impl FromRequest for ApiKeyGuard {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(check(req))
    }
}
