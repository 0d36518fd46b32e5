//! User registration and lookup.
//!
//! ```text
//! POST /usuarios {"nome":"Ana","email":"ana@example.com","senha":"s3cret"}   (X-API-Key)
//! GET  /usuarios/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{FieldError, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::api_key::ApiKeyGuard;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration body. The password never appears in a response.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    /// Display name.
    #[schema(example = "Ana")]
    pub nome: String,
    /// Unique email address.
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Plain-text password; hashed before storage.
    #[schema(example = "s3cret")]
    pub senha: String,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = FieldError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::new(value.nome, value.email, Zeroizing::new(value.senha))
    }
}

/// A registered user without credentials.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Database identifier.
    pub id: i32,
    /// Display name.
    pub nome: String,
    /// Email address.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            nome: value.name,
            email: value.email.into(),
        }
    }
}

/// Register a user, storing only a salted digest of the password.
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Registered user", body = UserResponse),
        (status = 400, description = "Invalid payload or duplicate email", body = ErrorSchema),
        (status = 401, description = "Missing or invalid API key", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security(("ApiKey" = []))
)]
#[post("/usuarios")]
pub async fn register_user(
    _guard: ApiKeyGuard,
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users_command.register_user(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown id", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/usuarios/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.user_by_id(path.into_inner()).await?;
    Ok(web::Json(user.into()))
}
