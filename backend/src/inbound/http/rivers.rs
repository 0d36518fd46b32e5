//! River endpoints.
//!
//! ```text
//! GET  /rios
//! POST /rios                                   (X-API-Key)
//! GET  /rios/{codigo}
//! PUT  /rios/{codigo}
//! GET  /rios/nome/{nome}
//! GET  /rio/{nome}/coletas/{parametro}/resumo
//! GET  /rio/{nome}/coletas/{parametro}/grafico
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    MeasurementPoint, River, RiverChanges, RiverDraft, RiverParameterSeries,
    RiverParameterSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::api_key::ApiKeyGuard;
use crate::inbound::http::schemas::{ErrorSchema, OneOrMany, RiverLookupSchema};
use crate::inbound::http::state::HttpState;

/// Body for `POST /rios`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RiverRequest {
    /// Display name.
    #[schema(example = "Rio Doce")]
    pub nome: String,
    /// Unique river code.
    #[schema(example = "RD-01")]
    pub codigo: String,
    /// Free text; stored as empty when omitted.
    #[serde(default)]
    pub descricao: Option<String>,
}

impl TryFrom<RiverRequest> for RiverDraft {
    type Error = crate::domain::FieldError;

    fn try_from(value: RiverRequest) -> Result<Self, Self::Error> {
        Self::new(value.nome, value.codigo, value.descricao.unwrap_or_default())
    }
}

/// Body for `PUT /rios/{codigo}`; omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RiverUpdateRequest {
    /// New display name.
    #[serde(default)]
    pub nome: Option<String>,
    /// New code; must not belong to another river.
    #[serde(default)]
    pub codigo: Option<String>,
    /// New description.
    #[serde(default)]
    pub descricao: Option<String>,
}

impl TryFrom<RiverUpdateRequest> for RiverChanges {
    type Error = crate::domain::FieldError;

    fn try_from(value: RiverUpdateRequest) -> Result<Self, Self::Error> {
        Self::new(value.nome, value.codigo, value.descricao)
    }
}

/// A stored river.
#[derive(Debug, Serialize, ToSchema)]
pub struct RiverResponse {
    /// Database identifier.
    pub id: i32,
    /// Display name.
    pub nome: String,
    /// Unique river code.
    pub codigo: String,
    /// Free text, possibly empty.
    pub descricao: String,
}

impl From<River> for RiverResponse {
    fn from(value: River) -> Self {
        Self {
            id: value.id,
            nome: value.name,
            codigo: value.code,
            descricao: value.description,
        }
    }
}

/// Aggregates over every measurement of one parameter in one river.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// River id.
    pub id: i32,
    /// Parameter name.
    pub nome: String,
    /// Arithmetic mean.
    #[serde(rename = "média")]
    #[schema(rename = "média")]
    pub media: f64,
    /// Largest value.
    #[serde(rename = "máximo")]
    #[schema(rename = "máximo")]
    pub maximo: f64,
    /// Smallest value.
    #[serde(rename = "mínimo")]
    #[schema(rename = "mínimo")]
    pub minimo: f64,
}

impl From<RiverParameterSummary> for SummaryResponse {
    fn from(value: RiverParameterSummary) -> Self {
        Self {
            id: value.river_id,
            nome: value.parameter,
            media: value.stats.mean,
            maximo: value.stats.maximum,
            minimo: value.stats.minimum,
        }
    }
}

/// One chart point.
#[derive(Debug, Serialize, ToSchema)]
pub struct PointResponse {
    /// Sampling date.
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub data: NaiveDate,
    /// Measured value.
    pub valor: f64,
}

impl From<MeasurementPoint> for PointResponse {
    fn from(value: MeasurementPoint) -> Self {
        Self {
            data: value.sampled_on,
            valor: value.value,
        }
    }
}

/// Chart series for one parameter in one river, in storage order.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesResponse {
    /// River id.
    pub id: i32,
    /// Parameter name.
    pub nome: String,
    /// Points in storage order.
    pub dados: Vec<PointResponse>,
}

impl From<RiverParameterSeries> for SeriesResponse {
    fn from(value: RiverParameterSeries) -> Self {
        Self {
            id: value.river_id,
            nome: value.parameter,
            dados: value.points.into_iter().map(PointResponse::from).collect(),
        }
    }
}

/// Path segments of the per-river analytics routes.
#[derive(Debug, Deserialize)]
pub struct RiverParameterPath {
    nome: String,
    parametro: String,
}

/// List every river ordered by id.
#[utoipa::path(
    get,
    path = "/rios",
    responses(
        (status = 200, description = "Rivers", body = [RiverResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "listRivers"
)]
#[get("/rios")]
pub async fn list_rivers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RiverResponse>>> {
    let rivers = state.rivers.list_rivers().await?;
    Ok(web::Json(rivers.into_iter().map(RiverResponse::from).collect()))
}

/// Register a river.
#[utoipa::path(
    post,
    path = "/rios",
    request_body = RiverRequest,
    responses(
        (status = 200, description = "Created river", body = RiverResponse),
        (status = 400, description = "Invalid payload or duplicate code", body = ErrorSchema),
        (status = 401, description = "Missing or invalid API key", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "createRiver",
    security(("ApiKey" = []))
)]
#[post("/rios")]
pub async fn create_river(
    _guard: ApiKeyGuard,
    state: web::Data<HttpState>,
    payload: web::Json<RiverRequest>,
) -> ApiResult<web::Json<RiverResponse>> {
    let draft = RiverDraft::try_from(payload.into_inner())?;
    let river = state.rivers_command.create_river(draft).await?;
    Ok(web::Json(river.into()))
}

/// Look up rivers whose name contains the fragment, ignoring case.
#[utoipa::path(
    get,
    path = "/rios/nome/{nome}",
    params(("nome" = String, Path, description = "Name fragment")),
    responses(
        (status = 200, description = "One river, or an array when several match", body = RiverLookupSchema),
        (status = 404, description = "No river matches", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "findRiversByName"
)]
#[get("/rios/nome/{nome}")]
pub async fn rivers_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let matches = state.rivers.rivers_by_name(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OneOrMany::<RiverResponse>::from(matches)))
}

/// Fetch a river by its exact code.
#[utoipa::path(
    get,
    path = "/rios/{codigo}",
    params(("codigo" = String, Path, description = "River code")),
    responses(
        (status = 200, description = "River", body = RiverResponse),
        (status = 404, description = "Unknown code", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "getRiver"
)]
#[get("/rios/{codigo}")]
pub async fn get_river(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RiverResponse>> {
    let river = state.rivers.river_by_code(&path.into_inner()).await?;
    Ok(web::Json(river.into()))
}

/// Apply a partial update to the river with the given code.
#[utoipa::path(
    put,
    path = "/rios/{codigo}",
    params(("codigo" = String, Path, description = "River code")),
    request_body = RiverUpdateRequest,
    responses(
        (status = 200, description = "Updated river", body = RiverResponse),
        (status = 400, description = "Invalid payload or duplicate code", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "updateRiver"
)]
#[put("/rios/{codigo}")]
pub async fn update_river(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RiverUpdateRequest>,
) -> ApiResult<web::Json<RiverResponse>> {
    let changes = RiverChanges::try_from(payload.into_inner())?;
    let river = state
        .rivers_command
        .update_river(&path.into_inner(), changes)
        .await?;
    Ok(web::Json(river.into()))
}

/// Mean, maximum and minimum of a parameter measured in a river.
#[utoipa::path(
    get,
    path = "/rio/{nome}/coletas/{parametro}/resumo",
    params(
        ("nome" = String, Path, description = "Exact river name"),
        ("parametro" = String, Path, description = "Exact parameter name")
    ),
    responses(
        (status = 200, description = "Aggregates", body = SummaryResponse),
        (status = 404, description = "River, parameter or measurements missing", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "riverParameterSummary"
)]
#[get("/rio/{nome}/coletas/{parametro}/resumo")]
pub async fn parameter_summary(
    state: web::Data<HttpState>,
    path: web::Path<RiverParameterPath>,
) -> ApiResult<web::Json<SummaryResponse>> {
    let RiverParameterPath { nome, parametro } = path.into_inner();
    let summary = state.rivers.parameter_summary(&nome, &parametro).await?;
    Ok(web::Json(summary.into()))
}

/// Every measurement of a parameter in a river, for charting.
#[utoipa::path(
    get,
    path = "/rio/{nome}/coletas/{parametro}/grafico",
    params(
        ("nome" = String, Path, description = "Exact river name"),
        ("parametro" = String, Path, description = "Exact parameter name")
    ),
    responses(
        (status = 200, description = "Series", body = SeriesResponse),
        (status = 404, description = "River, parameter or measurements missing", body = ErrorSchema)
    ),
    tags = ["rivers"],
    operation_id = "riverParameterSeries"
)]
#[get("/rio/{nome}/coletas/{parametro}/grafico")]
pub async fn parameter_series(
    state: web::Data<HttpState>,
    path: web::Path<RiverParameterPath>,
) -> ApiResult<web::Json<SeriesResponse>> {
    let RiverParameterPath { nome, parametro } = path.into_inner();
    let series = state.rivers.parameter_series(&nome, &parametro).await?;
    Ok(web::Json(series.into()))
}

#[cfg(test)]
#[path = "rivers_tests.rs"]
mod tests;
