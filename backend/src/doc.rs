//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every HTTP endpoint of the
//! inbound layer together with the request and response schemas, plus the
//! session cookie security scheme. The generated specification backs the
//! Swagger UI served in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::recipes::{IngredientLinePayload, RecipePayload, ShortLinkResponse};
use crate::inbound::http::schemas::{
    IngredientResponse, RecipeIngredientResponse, RecipeResponse, RecipeShortResponse,
    SubscriptionResponse, TagResponse, UserResponse,
};
use crate::inbound::http::users::{AvatarPayload, LoginRequest, RegisterRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "id",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pantry backend API",
        description = "HTTP interface for recipes, catalog data, favorites, \
                       shopping lists, and author subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::set_avatar,
        crate::inbound::http::users::delete_avatar,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::get_recipe_link,
        crate::inbound::http::catalog::list_tags,
        crate::inbound::http::catalog::get_tag,
        crate::inbound::http::catalog::list_ingredients,
        crate::inbound::http::catalog::get_ingredient,
        crate::inbound::http::relations::add_favorite,
        crate::inbound::http::relations::remove_favorite,
        crate::inbound::http::relations::add_to_cart,
        crate::inbound::http::relations::remove_from_cart,
        crate::inbound::http::relations::download_shopping_cart,
        crate::inbound::http::subscriptions::subscribe,
        crate::inbound::http::subscriptions::unsubscribe,
        crate::inbound::http::subscriptions::list_subscriptions,
        crate::inbound::http::short_link::resolve_short_link,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        Error,
        ErrorCode,
        HealthResponse,
        UserResponse,
        TagResponse,
        IngredientResponse,
        RecipeIngredientResponse,
        RecipeResponse,
        RecipeShortResponse,
        SubscriptionResponse,
        RegisterRequest,
        LoginRequest,
        AvatarPayload,
        RecipePayload,
        IngredientLinePayload,
        ShortLinkResponse,
    )),
    tags(
        (name = "users", description = "Account registration and profiles"),
        (name = "auth", description = "Session login and logout"),
        (name = "recipes", description = "Recipe CRUD and short links"),
        (name = "catalog", description = "Read-only ingredient and tag data"),
        (name = "favorites", description = "Favorite toggles"),
        (name = "shopping-cart", description = "Shopping cart and list download"),
        (name = "subscriptions", description = "Author follow lists"),
        (name = "health", description = "Liveness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;
    use utoipa::OpenApi;

    /// Assert that an Object schema contains a field with the given name.
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
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_registers_every_recipe_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/recipes",
            "/api/recipes/{id}",
            "/api/recipes/{id}/get-link",
            "/api/recipes/download_shopping_cart",
            "/s/{code}",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }

    #[test]
    fn openapi_lists_recipes_with_an_author_filter() {
        let value = serde_json::to_value(ApiDoc::openapi()).expect("serialises");
        let params = value["paths"]["/api/recipes"]["get"]["parameters"]
            .as_array()
            .expect("query parameters");
        assert!(params.iter().any(|param| param["name"] == "author"));
    }

    #[test]
    fn openapi_registers_every_user_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/users",
            "/api/users/{id}",
            "/api/users/me",
            "/api/users/subscriptions",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }
}
