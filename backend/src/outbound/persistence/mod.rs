//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_catalog_repository;
mod diesel_error_mapping;
mod diesel_recipe_repository;
mod diesel_relation_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_catalog_repository::DieselCatalogRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_relation_repository::DieselRelationRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig};
