use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiErrorBody;
use super::ApiSuccess;
use crate::domain::people::models::PersonDetail;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Character detail by catalog id.
#[utoipa::path(
    get,
    path = "/api/people/{id}",
    tag = "people",
    params(("id" = String, Path, description = "Catalog character id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Character found", body = PersonDetail),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorBody),
        (status = 404, description = "Character not found", body = ApiErrorBody),
        (status = 502, description = "Catalog unavailable", body = ApiErrorBody)
    )
)]
pub async fn get_person(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<PersonDetail>, ApiError> {
    tracing::debug!(username = %auth_user.0.username, id = %id, "Character detail requested");

    state
        .people_service
        .get_person_by_id(&id)
        .await
        .map_err(ApiError::from)
        .map(|detail| ApiSuccess::new(StatusCode::OK, detail))
}
