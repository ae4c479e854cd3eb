//! Transport-agnostic core of the recipe platform.
//!
//! Entities, validation, and services live here, isolated from Actix and
//! Diesel. Adapters on either side of the hexagon depend on this module;
//! it depends on none of them.

pub mod catalog;
pub mod catalog_service;
mod error;
pub mod image;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod recipe_validation;
pub mod relation_service;
pub mod shopping_list;
pub mod subscription_service;
pub mod user;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use error::{Error, ErrorCode};
pub use recipe_service::{RecipeService, RecipeView};
pub use relation_service::{RelationToggleService, ShoppingListService};
pub use subscription_service::{SubscriptionService, SubscriptionView};
pub use user_service::{Registration, UserService};
