//! Read-only catalog HTTP handlers.
//!
//! ```text
//! GET /api/tags
//! GET /api/tags/{id}
//! GET /api/ingredients
//! GET /api/ingredients/{id}
//! ```

use actix_web::{get, web};
use uuid::Uuid;

use crate::domain::Error;
use crate::inbound::http::schemas::{IngredientResponse, TagResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every tag.
#[utoipa::path(
    get,
    path = "/api/tags",
    responses((status = 200, description = "All tags", body = [TagResponse])),
    tags = ["catalog"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.catalog.tags().await?;
    Ok(web::Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Unknown tag", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Tag identifier")),
    tags = ["catalog"],
    operation_id = "getTag"
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<TagResponse>> {
    let tag = state.catalog.tag(path.into_inner()).await?;
    Ok(web::Json(TagResponse::from(tag)))
}

/// List every ingredient.
#[utoipa::path(
    get,
    path = "/api/ingredients",
    responses((status = 200, description = "All ingredients", body = [IngredientResponse])),
    tags = ["catalog"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let ingredients = state.catalog.ingredients().await?;
    Ok(web::Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Unknown ingredient", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    tags = ["catalog"],
    operation_id = "getIngredient"
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let ingredient = state.catalog.ingredient(path.into_inner()).await?;
    Ok(web::Json(IngredientResponse::from(ingredient)))
}
