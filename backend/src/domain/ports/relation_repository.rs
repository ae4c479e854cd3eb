//! Port abstraction for the favorite and shopping-cart relation stores.
//!
//! Both relations are unique (user, recipe) pairs with identical toggle
//! semantics, so a single port serves them, keyed by [`RelationKind`].

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::shopping_list::CartLine;

/// Which (user, recipe) relation a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Bookmarked recipes.
    Favorite,
    /// Recipes queued for the shopping list.
    Cart,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorite => f.write_str("favorites"),
            Self::Cart => f.write_str("shopping cart"),
        }
    }
}

/// Persistence errors raised by relation repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationPersistenceError {
    /// Repository connection could not be established.
    #[error("relation repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("relation repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The (user, recipe) pair is already present.
    #[error("relation already exists")]
    Duplicate,
    /// The (user, recipe) pair is absent.
    #[error("relation not found")]
    Missing,
}

impl RelationPersistenceError {
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
}

/// Toggle store for favorites and shopping-cart entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRelationRepository: Send + Sync {
    /// Insert the pair; [`RelationPersistenceError::Duplicate`] when present.
    async fn add(
        &self,
        kind: RelationKind,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), RelationPersistenceError>;

    /// Delete the pair; [`RelationPersistenceError::Missing`] when absent.
    async fn remove(
        &self,
        kind: RelationKind,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), RelationPersistenceError>;

    /// Every ingredient line of every recipe in the user's cart, joined with
    /// the catalog name and unit. Raw, ungrouped input for the aggregator.
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RelationPersistenceError>;
}
