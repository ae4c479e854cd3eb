//! Favorite and shopping-cart HTTP handlers, plus the list download.
//!
//! ```text
//! POST   /api/recipes/{id}/favorite
//! DELETE /api/recipes/{id}/favorite
//! POST   /api/recipes/{id}/shopping_cart
//! DELETE /api/recipes/{id}/shopping_cart
//! GET    /api/recipes/download_shopping_cart
//! ```

use actix_web::http::header::ContentDisposition;
use actix_web::{delete, get, post, web, HttpResponse};

use crate::domain::ports::RelationKind;
use crate::domain::Error;
use crate::inbound::http::schemas::RecipeShortResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Filename offered for the shopping-list download.
const SHOPPING_LIST_FILENAME: &str = "shopping_list.csv";

async fn add_relation(
    state: &HttpState,
    session: &SessionContext,
    kind: RelationKind,
    recipe_id: uuid::Uuid,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let recipe = state.relations.add(kind, user_id, recipe_id).await?;
    Ok(HttpResponse::Created().json(RecipeShortResponse::from(recipe)))
}

async fn remove_relation(
    state: &HttpState,
    session: &SessionContext,
    kind: RelationKind,
    recipe_id: uuid::Uuid,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.relations.remove(kind, user_id, recipe_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a recipe to the authenticated user's favorites.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    responses(
        (status = 201, description = "Added to favorites", body = RecipeShortResponse),
        (status = 400, description = "Already in favorites", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    params(("id" = uuid::Uuid, Path, description = "Recipe identifier")),
    tags = ["favorites"],
    operation_id = "addFavorite"
)]
#[post("/recipes/{id}/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<HttpResponse> {
    add_relation(&state, &session, RelationKind::Favorite, path.into_inner()).await
}

/// Remove a recipe from the authenticated user's favorites.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not in favorites", body = Error)
    ),
    params(("id" = uuid::Uuid, Path, description = "Recipe identifier")),
    tags = ["favorites"],
    operation_id = "removeFavorite"
)]
#[delete("/recipes/{id}/favorite")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<HttpResponse> {
    remove_relation(&state, &session, RelationKind::Favorite, path.into_inner()).await
}

/// Add a recipe to the authenticated user's shopping cart.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    responses(
        (status = 201, description = "Added to the cart", body = RecipeShortResponse),
        (status = 400, description = "Already in the cart", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    params(("id" = uuid::Uuid, Path, description = "Recipe identifier")),
    tags = ["shopping-cart"],
    operation_id = "addToCart"
)]
#[post("/recipes/{id}/shopping_cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<HttpResponse> {
    add_relation(&state, &session, RelationKind::Cart, path.into_inner()).await
}

/// Remove a recipe from the authenticated user's shopping cart.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    responses(
        (status = 204, description = "Removed from the cart"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not in the cart", body = Error)
    ),
    params(("id" = uuid::Uuid, Path, description = "Recipe identifier")),
    tags = ["shopping-cart"],
    operation_id = "removeFromCart"
)]
#[delete("/recipes/{id}/shopping_cart")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<HttpResponse> {
    remove_relation(&state, &session, RelationKind::Cart, path.into_inner()).await
}

/// Download the aggregated shopping list as a CSV attachment.
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    responses(
        (status = 200, description = "Aggregated shopping list", content_type = "text/csv"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["shopping-cart"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download_shopping_cart")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let csv = state.shopping_list.csv(user_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition::attachment(SHOPPING_LIST_FILENAME))
        .body(csv))
}
