//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (database repositories, the blob store). Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants
//! instead of returning `anyhow::Result`.

mod blob_store;
mod catalog_repository;
mod recipe_repository;
mod relation_repository;
mod subscription_repository;
mod user_repository;

pub use blob_store::{BlobStore, BlobStoreError};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipePersistenceError, RecipeRepository};
#[cfg(test)]
pub use relation_repository::MockRecipeRelationRepository;
pub use relation_repository::{RecipeRelationRepository, RelationKind, RelationPersistenceError};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{SubscriptionPersistenceError, SubscriptionRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
pub use blob_store::MockBlobStore;
