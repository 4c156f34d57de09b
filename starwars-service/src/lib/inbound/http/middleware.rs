use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the caller resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

/// Middleware that validates the bearer token once per request and stores the
/// caller in request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)
        .map_err(IntoResponse::into_response)?
        .to_string();

    let principal = state
        .auth_service
        .authenticate_token(&token)
        .await
        .map_err(|e| {
            match &e {
                AuthError::InvalidToken(reason) => {
                    tracing::warn!(reason = %reason, "JWT validation failed")
                }
                other => tracing::warn!(error = %other, "Bearer token rejected"),
            }
            ApiError::from(e).into_response()
        })?;

    tracing::debug!(username = %principal.username, role = %principal.role, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedUser(principal));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "invalid Authorization header format, expected: Bearer <token>".to_string(),
        )
    })
}
