//! User account HTTP handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users
//! GET    /api/users/me
//! GET    /api/users/{id}
//! PUT    /api/users/me/avatar
//! DELETE /api/users/me/avatar
//! POST   /api/auth/login
//! POST   /api/auth/logout
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Registration};
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for account registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request payload for session login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
}

/// Request and response payload for the avatar endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarPayload {
    pub avatar: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid or conflicting registration", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let user = state
        .users
        .register(Registration {
            email: payload.email,
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List every registered profile.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Registered profiles", body = [UserResponse])
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(web::Json(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Fetch a user's public profile.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 404, description = "Unknown user", body = Error)
    ),
    params(("id" = Uuid, Path, description = "User identifier")),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.profile(path.into_inner()).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "getCurrentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.users.profile(user_id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Upload the authenticated user's avatar as a base64 data URI.
#[utoipa::path(
    put,
    path = "/api/users/me/avatar",
    request_body = AvatarPayload,
    responses(
        (status = 200, description = "Avatar stored", body = AvatarPayload),
        (status = 400, description = "Payload is not a decodable image", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "setAvatar"
)]
#[put("/users/me/avatar")]
pub async fn set_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AvatarPayload>,
) -> ApiResult<web::Json<AvatarPayload>> {
    let user_id = session.require_user_id()?;
    let reference = state
        .users
        .set_avatar(user_id, &payload.into_inner().avatar)
        .await?;
    Ok(web::Json(AvatarPayload { avatar: reference }))
}

/// Remove the authenticated user's avatar.
#[utoipa::path(
    delete,
    path = "/api/users/me/avatar",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAvatar"
)]
#[delete("/users/me/avatar")]
pub async fn delete_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.users.clear_avatar(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Open a session for the account behind the given email.
///
/// Credential verification lives with the external identity provider;
/// this endpoint only binds the resolved account to a session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = UserResponse),
        (status = 401, description = "Unknown account", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.authenticate(&payload.into_inner().email).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Close the current session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session closed")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}
