use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiErrorBody;
use crate::domain::user::errors::AuthError;
use crate::domain::user::models::NewPassword;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Validation failed or username taken", body = ApiErrorBody)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::CREATED)
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Email address used as the login name
    #[serde(default)]
    #[schema(example = "luke@rebellion.org")]
    username: Option<String>,
    /// Between 5 and 30 characters
    #[serde(default)]
    #[schema(example = "password123")]
    password: Option<String>,
}

impl RegisterRequest {
    /// Validate fields in order; the first broken rule is reported.
    fn try_into_command(self) -> Result<RegisterCommand, AuthError> {
        let username = Username::email(self.username.unwrap_or_default())?;
        let password = NewPassword::new(self.password.unwrap_or_default())?;
        Ok(RegisterCommand { username, password })
    }
}
