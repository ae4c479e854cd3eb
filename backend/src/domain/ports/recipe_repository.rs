//! Port abstraction for recipe aggregate persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::recipe::Recipe;

/// Persistence errors raised by recipe repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipePersistenceError {
    /// Repository connection could not be established.
    #[error("recipe repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("recipe repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// A uniqueness constraint was violated, e.g. a duplicate short code.
    #[error("recipe conflict: {message}")]
    Conflict {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The targeted recipe does not exist.
    #[error("recipe not found")]
    Missing,
}

impl RecipePersistenceError {
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
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Persistence contract for the recipe aggregate.
///
/// `insert` and `replace` write the whole aggregate (recipe row, ingredient
/// lines, tag references) inside one transaction so a mid-failure never
/// leaves a recipe with a partial ingredient set. `replace` deletes all
/// existing lines and tag references and recreates them from the given
/// aggregate; line identity is not preserved across edits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a new aggregate atomically.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError>;

    /// Replace an existing aggregate atomically.
    async fn replace(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError>;

    /// Delete a recipe and its owned lines; [`RecipePersistenceError::Missing`]
    /// when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<(), RecipePersistenceError>;

    /// Fetch one aggregate by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RecipePersistenceError>;

    /// List recipes newest first, up to `limit`, optionally narrowed to
    /// one author.
    async fn list_recent(
        &self,
        author_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// Count an author's recipes.
    async fn count_by_author(&self, author_id: Uuid) -> Result<i64, RecipePersistenceError>;

    /// Store a generated short code; [`RecipePersistenceError::Conflict`] when
    /// the code is already taken by another recipe.
    async fn set_short_code(
        &self,
        id: Uuid,
        code: &str,
    ) -> Result<(), RecipePersistenceError>;

    /// Resolve a short code to a recipe id.
    async fn find_by_short_code(
        &self,
        code: &str,
    ) -> Result<Option<Uuid>, RecipePersistenceError>;
}
