//! River water-quality monitoring service.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services
//! and port traits; [`inbound`] exposes them over HTTP; [`outbound`] backs
//! the driven ports with PostgreSQL and loads the prediction model.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
