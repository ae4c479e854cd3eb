//! Recipe HTTP handlers.
//!
//! ```text
//! GET    /api/recipes
//! POST   /api/recipes
//! GET    /api/recipes/{id}
//! PUT    /api/recipes/{id}
//! DELETE /api/recipes/{id}
//! GET    /api/recipes/{id}/get-link
//! ```

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::recipe::{IngredientLine, RecipeDraft};
use crate::domain::Error;
use crate::inbound::http::schemas::RecipeResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;
use crate::inbound::http::ApiResult;

/// One ingredient line in a recipe payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLinePayload {
    pub id: Uuid,
    pub amount: f64,
}

/// Request payload for creating or replacing a recipe.
///
/// `tags` and `ingredients` are required on update as well as create: an
/// edit always states the full intended set, never a partial merge.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tags: Option<Vec<Uuid>>,
    pub ingredients: Option<Vec<IngredientLinePayload>>,
}

/// Response payload for the short-link endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

fn parse_recipe_payload(payload: RecipePayload) -> Result<RecipeDraft, Error> {
    let name = payload.name.ok_or_else(|| missing_field_error("name"))?;
    let text = payload.text.ok_or_else(|| missing_field_error("text"))?;
    let cooking_time = payload
        .cooking_time
        .ok_or_else(|| missing_field_error("cookingTime"))?;
    let tags = payload.tags.ok_or_else(|| missing_field_error("tags"))?;
    let ingredients = payload
        .ingredients
        .ok_or_else(|| missing_field_error("ingredients"))?
        .into_iter()
        .map(|line| IngredientLine {
            ingredient_id: line.id,
            amount: line.amount,
        })
        .collect();
    Ok(RecipeDraft {
        name,
        image: payload.image,
        text,
        cooking_time,
        tags,
        ingredients,
    })
}

/// Query parameters accepted by the recipe listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecipeListQuery {
    /// Narrow the listing to one author's recipes.
    pub author: Option<Uuid>,
}

/// List the newest recipes, optionally narrowed to one author.
#[utoipa::path(
    get,
    path = "/api/recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Newest recipes", body = [RecipeResponse])
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    query: web::Query<RecipeListQuery>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let views = state.recipes.list(query.into_inner().author).await?;
    Ok(web::Json(
        views.into_iter().map(RecipeResponse::from).collect(),
    ))
}

/// Create a new recipe owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipePayload>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = parse_recipe_payload(payload.into_inner())?;
    let recipe = state.recipes.create(user_id, draft).await?;
    let view = state.recipes.assemble_view(recipe).await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(view)))
}

/// Fetch one recipe with its author and catalog data.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let view = state.recipes.view(path.into_inner()).await?;
    Ok(web::Json(RecipeResponse::from(view)))
}

/// Replace a recipe; only the author may edit.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    request_body = RecipePayload,
    responses(
        (status = 200, description = "Recipe replaced", body = RecipeResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<RecipePayload>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let user_id = session.require_user_id()?;
    let draft = parse_recipe_payload(payload.into_inner())?;
    let recipe = state.recipes.update(user_id, path.into_inner(), draft).await?;
    let view = state.recipes.assemble_view(recipe).await?;
    Ok(web::Json(RecipeResponse::from(view)))
}

/// Delete a recipe; only the author may delete.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.recipes.delete(user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch (deriving on first request) the recipe's permanent short link.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    responses(
        (status = 200, description = "Short link", body = ShortLinkResponse),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    tags = ["recipes"],
    operation_id = "getRecipeLink"
)]
#[get("/recipes/{id}/get-link")]
pub async fn get_recipe_link(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ShortLinkResponse>> {
    let code = state.recipes.short_link(path.into_inner()).await?;
    let info = request.connection_info();
    Ok(web::Json(ShortLinkResponse {
        short_link: format!("{}://{}/s/{code}", info.scheme(), info.host()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn full_payload() -> RecipePayload {
        RecipePayload {
            name: Some("Bread".into()),
            image: Some("data:image/png;base64,aGVsbG8=".into()),
            text: Some("Knead and bake.".into()),
            cooking_time: Some(90),
            tags: Some(vec![Uuid::new_v4()]),
            ingredients: Some(vec![IngredientLinePayload {
                id: Uuid::new_v4(),
                amount: 200.0,
            }]),
        }
    }

    #[rstest]
    fn parse_accepts_a_full_payload() {
        let draft = parse_recipe_payload(full_payload()).expect("parses");
        assert_eq!(draft.name, "Bread");
        assert_eq!(draft.ingredients.len(), 1);
    }

    #[rstest]
    fn parse_allows_an_omitted_image() {
        let mut payload = full_payload();
        payload.image = None;
        let draft = parse_recipe_payload(payload).expect("parses");
        assert!(draft.image.is_none());
    }

    #[rstest]
    #[case::name(RecipePayload { name: None, ..full_payload() }, "name")]
    #[case::text(RecipePayload { text: None, ..full_payload() }, "text")]
    #[case::cooking_time(RecipePayload { cooking_time: None, ..full_payload() }, "cookingTime")]
    #[case::tags(RecipePayload { tags: None, ..full_payload() }, "tags")]
    #[case::ingredients(RecipePayload { ingredients: None, ..full_payload() }, "ingredients")]
    fn parse_rejects_missing_fields(#[case] payload: RecipePayload, #[case] field: &str) {
        let err = parse_recipe_payload(payload).expect_err("must reject");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some(field));
    }

    #[rstest]
    fn short_link_response_uses_the_legacy_key() {
        let value = serde_json::to_value(ShortLinkResponse {
            short_link: "https://example.com/s/cafe1234".into(),
        })
        .expect("serialises");
        assert_eq!(value["short-link"], "https://example.com/s/cafe1234");
    }
}
