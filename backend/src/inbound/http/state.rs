//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O: tests build
//! the services over mocked ports.

use crate::domain::{
    CatalogService, RecipeService, RelationToggleService, ShoppingListService,
    SubscriptionService, UserService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserService,
    pub recipes: RecipeService,
    pub catalog: CatalogService,
    pub relations: RelationToggleService,
    pub shopping_list: ShoppingListService,
    pub subscriptions: SubscriptionService,
}
