use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use utoipa::IntoParams;

use super::ApiError;
use super::ApiErrorBody;
use super::ApiSuccess;
use crate::domain::people::models::PeopleQuery;
use crate::domain::people::models::PersonPage;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Page through characters, or search them by name.
#[utoipa::path(
    get,
    path = "/api/people",
    tag = "people",
    params(ListPeopleParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of characters", body = PersonPage),
        (status = 400, description = "Malformed query parameters", body = ApiErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorBody),
        (status = 500, description = "Catalog listing or search failed", body = ApiErrorBody)
    )
)]
pub async fn list_people(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    params: Result<Query<ListPeopleParams>, QueryRejection>,
) -> Result<ApiSuccess<PersonPage>, ApiError> {
    let Query(params) = params?;
    tracing::debug!(
        username = %auth_user.0.username,
        search_name = ?params.name,
        page = ?params.page,
        limit = ?params.limit,
        "Character listing requested"
    );

    state
        .people_service
        .get_people(params.into())
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page))
}

/// Query string of `GET /api/people`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPeopleParams {
    /// Name to search for; paging is ignored when present
    pub name: Option<String>,
    /// Page number, 1 when omitted
    pub page: Option<i64>,
    /// Page size, 10 when omitted
    pub limit: Option<i64>,
}

impl From<ListPeopleParams> for PeopleQuery {
    fn from(params: ListPeopleParams) -> Self {
        Self {
            name: params.name,
            page: params.page.unwrap_or(PeopleQuery::DEFAULT_PAGE),
            limit: params.limit.unwrap_or(PeopleQuery::DEFAULT_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_paging_uses_defaults() {
        let query = PeopleQuery::from(ListPeopleParams::default());
        assert_eq!(query, PeopleQuery::default());
        assert_eq!((query.page, query.limit), (1, 10));
    }

    #[test]
    fn test_explicit_paging_is_kept() {
        let query = PeopleQuery::from(ListPeopleParams {
            name: Some("r2".to_string()),
            page: Some(0),
            limit: Some(-5),
        });
        assert_eq!(query.page, 0);
        assert_eq!(query.limit, -5);
        assert_eq!(query.name.as_deref(), Some("r2"));
    }
}
