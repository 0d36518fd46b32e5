//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration, plus the response shape
//! shared by the name-lookup endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Matches;
use crate::inbound::http::parameters::ParameterResponse;
use crate::inbound::http::rivers::RiverResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The API key is missing or does not match.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "river RD-01 not found")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

/// Name-lookup body: a bare object for one hit, an array otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Exactly one match.
    One(T),
    /// Several matches, ordered by id.
    Many(Vec<T>),
}

/// OpenAPI schema for `GET /rios/nome/{nome}`, serialised as [`OneOrMany`].
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum RiverLookupSchema {
    /// Exactly one river matched.
    One(RiverResponse),
    /// Several rivers matched.
    Many(Vec<RiverResponse>),
}

/// OpenAPI schema for `GET /parametros/nome/{nome}`, serialised as
/// [`OneOrMany`].
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum ParameterLookupSchema {
    /// Exactly one parameter matched.
    One(ParameterResponse),
    /// Several parameters matched.
    Many(Vec<ParameterResponse>),
}

impl<D, T: From<D>> From<Matches<D>> for OneOrMany<T> {
    fn from(value: Matches<D>) -> Self {
        match value.map(T::from) {
            Matches::One(hit) => Self::One(hit),
            Matches::Many(hits) => Self::Many(hits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Matches::One(1), json!(1))]
    #[case(Matches::Many(vec![1, 2]), json!([1, 2]))]
    fn lookups_serialize_by_hit_count(#[case] hits: Matches<i32>, #[case] expected: serde_json::Value) {
        let body: OneOrMany<i64> = hits.into();
        assert_eq!(serde_json::to_value(body).expect("serializes"), expected);
    }
}
