//! Public short-link redirect handler, mounted outside the `/api` scope.
//!
//! ```text
//! GET /s/{code}
//! ```

use actix_web::http::header;
use actix_web::{get, web, HttpResponse};

use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Redirect a short code to the recipe it identifies.
#[utoipa::path(
    get,
    path = "/s/{code}",
    responses(
        (status = 302, description = "Redirect to the recipe page"),
        (status = 404, description = "Unknown short link", body = Error)
    ),
    params(("code" = String, Path, description = "Short-link code")),
    tags = ["recipes"],
    operation_id = "resolveShortLink"
)]
#[get("/s/{code}")]
pub async fn resolve_short_link(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe_id = state.recipes.resolve_short_link(&path.into_inner()).await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/recipes/{recipe_id}")))
        .finish())
}
