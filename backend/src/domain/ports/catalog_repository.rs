//! Port abstraction for the ingredient/tag catalog store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{Ingredient, Tag};

/// Persistence errors raised by catalog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogRepositoryError {
    /// Repository connection could not be established.
    #[error("catalog repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("catalog repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// A uniqueness constraint (name or slug) was violated.
    #[error("catalog entry already exists: {message}")]
    Duplicate {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl CatalogRepositoryError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Read and bulk-load access to the static catalog.
///
/// Bulk inserts are all-or-nothing: a failed batch leaves the catalog
/// untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List every ingredient, ordered by name.
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, CatalogRepositoryError>;

    /// Fetch one ingredient by id.
    async fn find_ingredient(
        &self,
        id: Uuid,
    ) -> Result<Option<Ingredient>, CatalogRepositoryError>;

    /// Fetch the subset of `ids` that exist in the catalog.
    async fn find_ingredients_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError>;

    /// Insert a batch of ingredients atomically, returning the count loaded.
    async fn insert_ingredients(
        &self,
        items: &[Ingredient],
    ) -> Result<usize, CatalogRepositoryError>;

    /// List every tag, ordered by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogRepositoryError>;

    /// Fetch one tag by id.
    async fn find_tag(&self, id: Uuid) -> Result<Option<Tag>, CatalogRepositoryError>;

    /// Fetch the subset of `ids` that exist in the catalog.
    async fn find_tags_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, CatalogRepositoryError>;

    /// Insert a batch of tags atomically, returning the count loaded.
    async fn insert_tags(&self, items: &[Tag]) -> Result<usize, CatalogRepositoryError>;
}
