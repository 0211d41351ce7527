//! Account handlers: registration and login.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"pw","role":"educator"}
//! POST /api/auth/login    {"email":"ada@example.com","password":"pw"}
//! ```
//!
//! Both return `data: { token, user }`.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CredentialValidationError, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{created, ok};
use crate::inbound::http::schemas::{AuthSessionSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credential_validation_error;

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `student` or `educator`.
    pub role: Option<String>,
}

impl TryFrom<&RegisterRequest> for Registration {
    type Error = CredentialValidationError;

    fn try_from(value: &RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
            value.role.as_deref(),
        )
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.email.as_deref(), value.password.as_deref())
    }
}

/// Create an account and return a signed token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthSessionSchema),
        (status = 400, description = "Invalid request or email already registered", body = ErrorSchema),
        (status = 409, description = "Concurrent registration of the same email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(&*payload).map_err(|err| credential_validation_error(&err))?;
    let session = state.registration.register(&registration).await?;
    Ok(created(session))
}

/// Exchange credentials for a signed token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthSessionSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&*payload).map_err(|err| credential_validation_error(&err))?;
    let session = state.login.login(&credentials).await?;
    Ok(ok(session))
}
