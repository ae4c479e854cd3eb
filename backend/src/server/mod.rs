//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::catalog::{get_ingredient, get_tag, list_ingredients, list_tags};
use crate::inbound::http::health::health;
use crate::inbound::http::recipes::{
    create_recipe, delete_recipe, get_recipe, get_recipe_link, list_recipes, update_recipe,
};
use crate::inbound::http::relations::{
    add_favorite, add_to_cart, download_shopping_cart, remove_favorite, remove_from_cart,
};
use crate::inbound::http::short_link::resolve_short_link;
use crate::inbound::http::subscriptions::{list_subscriptions, subscribe, unsubscribe};
use crate::inbound::http::users::{
    current_user, delete_avatar, get_user, list_users, login, logout, register, set_avatar,
};
use crate::inbound::http::HttpState;
use crate::middleware::Trace;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // Literal routes are registered ahead of their parameterised siblings
    // so `/users/me`, `/users/subscriptions`, and
    // `/recipes/download_shopping_cart` are not swallowed by `{id}`
    // matchers.
    let api = web::scope("/api")
        .wrap(session)
        .service(health)
        .service(register)
        .service(list_users)
        .service(current_user)
        .service(set_avatar)
        .service(delete_avatar)
        .service(login)
        .service(logout)
        .service(list_subscriptions)
        .service(subscribe)
        .service(unsubscribe)
        .service(get_user)
        .service(download_shopping_cart)
        .service(list_recipes)
        .service(create_recipe)
        .service(get_recipe_link)
        .service(add_favorite)
        .service(remove_favorite)
        .service(add_to_cart)
        .service(remove_from_cart)
        .service(get_recipe)
        .service(update_recipe)
        .service(delete_recipe)
        .service(list_tags)
        .service(get_tag)
        .service(list_ingredients)
        .service(get_ingredient);

    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(resolve_short_link);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        media_root: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
