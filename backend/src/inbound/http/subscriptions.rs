//! Subscription HTTP handlers.
//!
//! ```text
//! POST   /api/users/{id}/subscribe
//! DELETE /api/users/{id}/subscribe
//! GET    /api/users/subscriptions
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::domain::Error;
use crate::inbound::http::schemas::SubscriptionResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Already subscribed or self-subscription", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown author", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Author identifier")),
    tags = ["subscriptions"],
    operation_id = "subscribe"
)]
#[post("/users/{id}/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let follower_id = session.require_user_id()?;
    let view = state
        .subscriptions
        .subscribe(follower_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::from(view)))
}

/// Unfollow an author.
#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not subscribed", body = Error)
    ),
    params(("id" = Uuid, Path, description = "Author identifier")),
    tags = ["subscriptions"],
    operation_id = "unsubscribe"
)]
#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let follower_id = session.require_user_id()?;
    state
        .subscriptions
        .unsubscribe(follower_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The authenticated user's follow list with recipe previews.
#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    responses(
        (status = 200, description = "Follow list", body = [SubscriptionResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "listSubscriptions"
)]
#[get("/users/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubscriptionResponse>>> {
    let follower_id = session.require_user_id()?;
    let views = state.subscriptions.subscriptions(follower_id).await?;
    Ok(web::Json(
        views.into_iter().map(SubscriptionResponse::from).collect(),
    ))
}
