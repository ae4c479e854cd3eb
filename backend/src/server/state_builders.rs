//! Assembly of domain services over the persistence and blob-store adapters.

use std::sync::Arc;

use crate::domain::{
    CatalogService, RecipeService, RelationToggleService, ShoppingListService,
    SubscriptionService, UserService,
};
use crate::inbound::http::HttpState;
use crate::outbound::blobstore::FsBlobStore;
use crate::outbound::persistence::{
    DieselCatalogRepository, DieselRecipeRepository, DieselRelationRepository,
    DieselSubscriptionRepository, DieselUserRepository,
};
use crate::server::ServerConfig;

/// Wire every domain service to its database and filesystem adapters.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let catalog = Arc::new(DieselCatalogRepository::new(config.db_pool.clone()));
    let recipes = Arc::new(DieselRecipeRepository::new(config.db_pool.clone()));
    let relations = Arc::new(DieselRelationRepository::new(config.db_pool.clone()));
    let subscriptions = Arc::new(DieselSubscriptionRepository::new(config.db_pool.clone()));
    let blobs = Arc::new(FsBlobStore::new(config.media_root.clone()));

    HttpState {
        users: UserService::new(users.clone(), blobs.clone()),
        recipes: RecipeService::new(recipes.clone(), catalog.clone(), users.clone(), blobs),
        catalog: CatalogService::new(catalog),
        relations: RelationToggleService::new(relations.clone(), recipes.clone()),
        shopping_list: ShoppingListService::new(relations),
        subscriptions: SubscriptionService::new(subscriptions, users, recipes),
    }
}
