//! OpenAPI documentation for the HTTP API.
//!
//! [`ApiDoc`] collects the handler paths and the request, response and error
//! schemas. The router serves it as JSON at `/v3/api-docs` next to Swagger UI
//! at `/swagger-ui`.

use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;

use crate::domain::people::models::PersonDetail;
use crate::domain::people::models::PersonPage;
use crate::domain::people::models::PersonSummary;
use crate::inbound::http::handlers::health::HealthData;
use crate::inbound::http::handlers::login::LoginRequest;
use crate::inbound::http::handlers::login::LoginResponseData;
use crate::inbound::http::handlers::register::RegisterRequest;
use crate::inbound::http::handlers::ApiErrorBody;

pub const OPENAPI_JSON_PATH: &str = "/v3/api-docs";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Registers the bearer token scheme referenced by the protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Star Wars characters API",
        description = "Registration, login and token-protected access to Star Wars characters."
    ),
    paths(
        crate::inbound::http::handlers::register::register,
        crate::inbound::http::handlers::login::login,
        crate::inbound::http::handlers::get_person::get_person,
        crate::inbound::http::handlers::list_people::list_people,
        crate::inbound::http::handlers::health::health,
    ),
    components(schemas(
        PersonDetail,
        PersonSummary,
        PersonPage,
        RegisterRequest,
        LoginRequest,
        LoginResponseData,
        HealthData,
        ApiErrorBody,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "people", description = "Star Wars characters"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn test_page_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let page = schemas.get("PersonPage").expect("PersonPage schema");

        assert_object_schema_has_field(page, "totalRecords");
        assert_object_schema_has_field(page, "totalPages");
        assert_object_schema_has_field(page, "results");
    }

    #[test]
    fn test_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("ApiErrorBody").expect("ApiErrorBody schema");

        assert_object_schema_has_field(error, "status");
        assert_object_schema_has_field(error, "message");
        assert_object_schema_has_field(error, "timestamp");
    }

    #[test]
    fn test_every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/people",
            "/api/people/{id}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
