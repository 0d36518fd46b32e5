//! Parameter endpoints.
//!
//! ```text
//! GET    /parametros
//! POST   /parametros
//! GET    /parametros/{id}
//! PUT    /parametros/{id}
//! DELETE /parametros/{id}
//! GET    /parametros/nome/{nome}
//! GET    /parametros/email/{email}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FieldError, Parameter, ParameterChanges, ParameterDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, OneOrMany, ParameterLookupSchema};
use crate::inbound::http::state::HttpState;

/// Body for `POST /parametros`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ParameterRequest {
    /// Display name.
    #[schema(example = "pH")]
    pub nome: String,
    /// Grouping such as chemical or biological.
    #[schema(example = "físico-químico")]
    pub categoria: String,
}

impl TryFrom<ParameterRequest> for ParameterDraft {
    type Error = FieldError;

    fn try_from(value: ParameterRequest) -> Result<Self, Self::Error> {
        Self::new(value.nome, value.categoria)
    }
}

/// Body for `PUT /parametros/{id}`; omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ParameterUpdateRequest {
    /// New display name.
    #[serde(default)]
    pub nome: Option<String>,
    /// New category.
    #[serde(default)]
    pub categoria: Option<String>,
}

impl TryFrom<ParameterUpdateRequest> for ParameterChanges {
    type Error = FieldError;

    fn try_from(value: ParameterUpdateRequest) -> Result<Self, Self::Error> {
        Self::new(value.nome, value.categoria)
    }
}

/// A stored parameter.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParameterResponse {
    /// Database identifier.
    pub id: i32,
    /// Display name.
    pub nome: String,
    /// Category.
    pub categoria: String,
}

impl From<Parameter> for ParameterResponse {
    fn from(value: Parameter) -> Self {
        Self {
            id: value.id,
            nome: value.name,
            categoria: value.category,
        }
    }
}

/// List every parameter ordered by id.
#[utoipa::path(
    get,
    path = "/parametros",
    responses(
        (status = 200, description = "Parameters", body = [ParameterResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["parameters"],
    operation_id = "listParameters"
)]
#[get("/parametros")]
pub async fn list_parameters(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ParameterResponse>>> {
    let parameters = state.parameters.list_parameters().await?;
    Ok(web::Json(
        parameters.into_iter().map(ParameterResponse::from).collect(),
    ))
}

/// Register a parameter.
#[utoipa::path(
    post,
    path = "/parametros",
    request_body = ParameterRequest,
    responses(
        (status = 200, description = "Created parameter", body = ParameterResponse),
        (status = 400, description = "Invalid payload", body = ErrorSchema)
    ),
    tags = ["parameters"],
    operation_id = "createParameter"
)]
#[post("/parametros")]
pub async fn create_parameter(
    state: web::Data<HttpState>,
    payload: web::Json<ParameterRequest>,
) -> ApiResult<web::Json<ParameterResponse>> {
    let draft = ParameterDraft::try_from(payload.into_inner())?;
    let parameter = state.parameters_command.create_parameter(draft).await?;
    Ok(web::Json(parameter.into()))
}

/// Case-insensitive partial name lookup.
#[utoipa::path(
    get,
    path = "/parametros/nome/{nome}",
    params(("nome" = String, Path, description = "Name fragment")),
    responses(
        (status = 200, description = "One parameter, or an array when several match", body = ParameterLookupSchema),
        (status = 404, description = "No parameter matches", body = ErrorSchema)
    ),
    tags = ["parameters"],
    operation_id = "findParametersByName"
)]
#[get("/parametros/nome/{nome}")]
pub async fn parameters_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let matches = state
        .parameters
        .parameters_by_name(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(OneOrMany::<ParameterResponse>::from(matches)))
}

/// Parameters carry no email; this route always answers 404.
#[utoipa::path(
    get,
    path = "/parametros/email/{email}",
    params(("email" = String, Path, description = "Email address")),
    responses((status = 404, description = "Parameters have no email attribute", body = ErrorSchema)),
    tags = ["parameters"],
    operation_id = "findParameterByEmail"
)]
#[get("/parametros/email/{email}")]
pub async fn parameter_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ParameterResponse>> {
    let parameter = state
        .parameters
        .parameter_by_email(&path.into_inner())
        .await?;
    Ok(web::Json(parameter.into()))
}

/// Fetch a parameter by id.
#[utoipa::path(
    get,
    path = "/parametros/{id}",
    params(("id" = i32, Path, description = "Parameter id")),
    responses(
        (status = 200, description = "Parameter", body = ParameterResponse),
        (status = 400, description = "Non-numeric id", body = ErrorSchema),
        (status = 404, description = "Unknown id", body = ErrorSchema)
    ),
    tags = ["parameters"],
    operation_id = "getParameter"
)]
#[get("/parametros/{id}")]
pub async fn get_parameter(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ParameterResponse>> {
    let parameter = state.parameters.parameter_by_id(path.into_inner()).await?;
    Ok(web::Json(parameter.into()))
}

/// Apply a partial update to a parameter.
#[utoipa::path(
    put,
    path = "/parametros/{id}",
    params(("id" = i32, Path, description = "Parameter id")),
    request_body = ParameterUpdateRequest,
    responses(
        (status = 200, description = "Updated parameter", body = ParameterResponse),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 404, description = "Unknown id", body = ErrorSchema)
    ),
    tags = ["parameters"],
    operation_id = "updateParameter"
)]
#[put("/parametros/{id}")]
pub async fn update_parameter(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ParameterUpdateRequest>,
) -> ApiResult<web::Json<ParameterResponse>> {
    let changes = ParameterChanges::try_from(payload.into_inner())?;
    let parameter = state
        .parameters_command
        .update_parameter(path.into_inner(), changes)
        .await?;
    Ok(web::Json(parameter.into()))
}

/// Delete a parameter and its measurements, returning what was removed.
#[utoipa::path(
    delete,
    path = "/parametros/{id}",
    params(("id" = i32, Path, description = "Parameter id")),
    responses(
        (status = 200, description = "Deleted parameter", body = ParameterResponse),
        (status = 404, description = "Unknown id", body = ErrorSchema)
    ),
    tags = ["parameters"],
    operation_id = "deleteParameter"
)]
#[delete("/parametros/{id}")]
pub async fn delete_parameter(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ParameterResponse>> {
    let parameter = state
        .parameters_command
        .delete_parameter(path.into_inner())
        .await?;
    Ok(web::Json(parameter.into()))
}

#[cfg(test)]
#[path = "parameters_tests.rs"]
mod tests;
