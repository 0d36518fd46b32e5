//! Collection endpoints.
//!
//! ```text
//! POST /coletas                                  (X-API-Key)
//! GET  /coletas
//! GET  /coletas/parametro/{nome}
//! GET  /coletas/rio/{codigo}
//! GET  /coletas/rio/{codigo}/parametro/{nome}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Collection, CollectionDraft, CollectionFields, FieldError, Measurement, ParameterCoverage,
    RiverCoverage, RiverParameterValues, RiverSample,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::api_key::ApiKeyGuard;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// One measured value inside a collection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct MeasurementBody {
    /// Measured parameter.
    pub parametro_id: i32,
    /// Reading.
    pub valor: f64,
}

impl From<MeasurementBody> for Measurement {
    fn from(value: MeasurementBody) -> Self {
        Self {
            parameter_id: value.parametro_id,
            value: value.valor,
        }
    }
}

impl From<Measurement> for MeasurementBody {
    fn from(value: Measurement) -> Self {
        Self {
            parametro_id: value.parameter_id,
            valor: value.value,
        }
    }
}

/// Sampling event as sent by clients and echoed back (without its id).
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CollectionBody {
    /// Field code of the sampling event.
    #[schema(example = "C-2024-001")]
    pub codigo: String,
    /// Where the sample was taken.
    #[schema(example = "Ponte Velha")]
    pub locali: String,
    /// Sampled river.
    pub rio_id: i32,
    /// Sampling date.
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub datas: NaiveDate,
    /// Degrees, between -90 and 90.
    #[schema(example = -19.5)]
    pub latitude: f64,
    /// Degrees, between -180 and 180.
    #[schema(example = -42.6)]
    pub longitude: f64,
    /// At least one reading.
    pub coletas_parametros: Vec<MeasurementBody>,
}

impl TryFrom<CollectionBody> for CollectionDraft {
    type Error = FieldError;

    fn try_from(value: CollectionBody) -> Result<Self, Self::Error> {
        Self::try_from(CollectionFields {
            code: value.codigo,
            location: value.locali,
            river_id: value.rio_id,
            sampled_on: value.datas,
            latitude: value.latitude,
            longitude: value.longitude,
            measurements: value
                .coletas_parametros
                .into_iter()
                .map(Measurement::from)
                .collect(),
        })
    }
}

impl From<Collection> for CollectionBody {
    fn from(value: Collection) -> Self {
        Self {
            codigo: value.code,
            locali: value.location,
            rio_id: value.river_id,
            datas: value.sampled_on,
            latitude: value.latitude,
            longitude: value.longitude,
            coletas_parametros: value
                .measurements
                .into_iter()
                .map(MeasurementBody::from)
                .collect(),
        }
    }
}

/// Rivers where a parameter was measured.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParameterRiversResponse {
    /// Parameter name.
    pub parametro: String,
    /// River names, sorted.
    pub rios: Vec<String>,
}

impl From<ParameterCoverage> for ParameterRiversResponse {
    fn from(value: ParameterCoverage) -> Self {
        Self {
            parametro: value.parameter,
            rios: value.rivers,
        }
    }
}

/// Parameters measured in a river.
#[derive(Debug, Serialize, ToSchema)]
pub struct RiverParametersResponse {
    /// River name.
    pub rio: String,
    /// Parameter names, sorted.
    pub parametros: Vec<String>,
}

impl From<RiverCoverage> for RiverParametersResponse {
    fn from(value: RiverCoverage) -> Self {
        Self {
            rio: value.river,
            parametros: value.parameters,
        }
    }
}

/// One dated reading with its sampling site.
#[derive(Debug, Serialize, ToSchema)]
pub struct SampleResponse {
    /// Sampling date.
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub data: NaiveDate,
    /// Sampling location.
    pub local: String,
    /// Reading.
    pub valor: f64,
    /// Site latitude.
    pub latitude: f64,
    /// Site longitude.
    pub longitude: f64,
}

impl From<RiverSample> for SampleResponse {
    fn from(value: RiverSample) -> Self {
        Self {
            data: value.sampled_on,
            local: value.location,
            valor: value.value,
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

/// Dated values of one parameter in one river, oldest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValuesResponse {
    /// River name.
    pub rio: String,
    /// Parameter name.
    pub parametro: String,
    /// Readings, oldest first.
    pub valores: Vec<SampleResponse>,
}

impl From<RiverParameterValues> for ValuesResponse {
    fn from(value: RiverParameterValues) -> Self {
        Self {
            rio: value.river,
            parametro: value.parameter,
            valores: value.samples.into_iter().map(SampleResponse::from).collect(),
        }
    }
}

/// Path segments of `/coletas/rio/{codigo}/parametro/{nome}`.
#[derive(Debug, Deserialize)]
pub struct RiverParameterPath {
    codigo: String,
    nome: String,
}

/// Record a sampling event with its measurements.
#[utoipa::path(
    post,
    path = "/coletas",
    request_body = CollectionBody,
    responses(
        (status = 201, description = "Stored collection", body = CollectionBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or invalid API key", body = ErrorSchema),
        (status = 404, description = "River or parameter not found", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "createCollection",
    security(("ApiKey" = []))
)]
#[post("/coletas")]
pub async fn create_collection(
    _guard: ApiKeyGuard,
    state: web::Data<HttpState>,
    payload: web::Json<CollectionBody>,
) -> ApiResult<HttpResponse> {
    let draft = CollectionDraft::try_from(payload.into_inner())?;
    let collection = state.collections_command.create_collection(draft).await?;
    Ok(HttpResponse::Created().json(CollectionBody::from(collection)))
}

/// Every collection with its measurements.
#[utoipa::path(
    get,
    path = "/coletas",
    responses(
        (status = 200, description = "Collections", body = [CollectionBody]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "listCollections"
)]
#[get("/coletas")]
pub async fn list_collections(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CollectionBody>>> {
    let collections = state.collections.list_collections().await?;
    Ok(web::Json(
        collections.into_iter().map(CollectionBody::from).collect(),
    ))
}

/// Rivers where the first parameter matching the fragment was measured.
#[utoipa::path(
    get,
    path = "/coletas/parametro/{nome}",
    params(("nome" = String, Path, description = "Parameter name fragment")),
    responses(
        (status = 200, description = "Rivers measuring the parameter", body = ParameterRiversResponse),
        (status = 404, description = "No parameter or no measurements", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "riversForParameter"
)]
#[get("/coletas/parametro/{nome}")]
pub async fn rivers_for_parameter(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ParameterRiversResponse>> {
    let coverage = state
        .collections
        .rivers_for_parameter(&path.into_inner())
        .await?;
    Ok(web::Json(coverage.into()))
}

/// Parameters measured in the river with the given code.
#[utoipa::path(
    get,
    path = "/coletas/rio/{codigo}",
    params(("codigo" = String, Path, description = "River code")),
    responses(
        (status = 200, description = "Parameters measured in the river", body = RiverParametersResponse),
        (status = 404, description = "No river or no measurements", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "parametersForRiver"
)]
#[get("/coletas/rio/{codigo}")]
pub async fn parameters_for_river(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RiverParametersResponse>> {
    let coverage = state
        .collections
        .parameters_for_river(&path.into_inner())
        .await?;
    Ok(web::Json(coverage.into()))
}

/// Dated readings of one parameter in one river.
#[utoipa::path(
    get,
    path = "/coletas/rio/{codigo}/parametro/{nome}",
    params(
        ("codigo" = String, Path, description = "River code"),
        ("nome" = String, Path, description = "Exact parameter name")
    ),
    responses(
        (status = 200, description = "Values ordered by date", body = ValuesResponse),
        (status = 404, description = "River, parameter or values missing", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "parameterValues"
)]
#[get("/coletas/rio/{codigo}/parametro/{nome}")]
pub async fn parameter_values(
    state: web::Data<HttpState>,
    path: web::Path<RiverParameterPath>,
) -> ApiResult<web::Json<ValuesResponse>> {
    let RiverParameterPath { codigo, nome } = path.into_inner();
    let values = state.collections.parameter_values(&codigo, &nome).await?;
    Ok(web::Json(values.into()))
}

#[cfg(test)]
#[path = "collections_tests.rs"]
mod tests;
