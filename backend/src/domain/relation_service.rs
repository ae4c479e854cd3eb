//! Favorite and shopping-cart toggles plus the shopping-list download.
//!
//! Both relations share toggle semantics: adding an existing pair or
//! removing an absent one is an error, never a silent no-op, so clients
//! can keep their state in sync with the server's.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::ports::{
    RecipeRelationRepository, RecipeRepository, RelationKind, RelationPersistenceError,
};
use super::recipe::Recipe;
use super::recipe_service::map_recipe_error;
use super::shopping_list::{aggregate, render_csv, ShoppingListEntry};
use super::Error;

/// Driving service for the favorite and cart (user, recipe) relations.
#[derive(Clone)]
pub struct RelationToggleService {
    relations: Arc<dyn RecipeRelationRepository>,
    recipes: Arc<dyn RecipeRepository>,
}

impl RelationToggleService {
    /// Create a new service over the given adapters.
    pub fn new(
        relations: Arc<dyn RecipeRelationRepository>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self { relations, recipes }
    }

    /// Add the recipe to the user's relation; returns the recipe so the
    /// handler can render the short representation.
    pub async fn add(
        &self,
        kind: RelationKind,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<Recipe, Error> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Error::not_found("recipe not found"))?;
        self.relations
            .add(kind, user_id, recipe_id)
            .await
            .map_err(|err| map_relation_error(kind, err))?;
        debug!(%user_id, %recipe_id, relation = %kind, "relation added");
        Ok(recipe)
    }

    /// Remove the recipe from the user's relation.
    pub async fn remove(
        &self,
        kind: RelationKind,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), Error> {
        self.relations
            .remove(kind, user_id, recipe_id)
            .await
            .map_err(|err| map_relation_error(kind, err))?;
        debug!(%user_id, %recipe_id, relation = %kind, "relation removed");
        Ok(())
    }
}

/// Driving service for the aggregated shopping-list download.
#[derive(Clone)]
pub struct ShoppingListService {
    relations: Arc<dyn RecipeRelationRepository>,
}

impl ShoppingListService {
    /// Create a new service over the given adapter.
    pub fn new(relations: Arc<dyn RecipeRelationRepository>) -> Self {
        Self { relations }
    }

    /// Aggregate every cart recipe's ingredient lines into one entry per
    /// ingredient, summed and ordered by name. An empty cart yields an
    /// empty list, not an error.
    pub async fn entries(&self, user_id: Uuid) -> Result<Vec<ShoppingListEntry>, Error> {
        let lines = self
            .relations
            .cart_lines(user_id)
            .await
            .map_err(|err| map_relation_error(RelationKind::Cart, err))?;
        Ok(aggregate(lines))
    }

    /// The aggregated list rendered as a CSV document.
    pub async fn csv(&self, user_id: Uuid) -> Result<String, Error> {
        let entries = self.entries(user_id).await?;
        Ok(render_csv(&entries))
    }
}

fn map_relation_error(kind: RelationKind, error: RelationPersistenceError) -> Error {
    match error {
        RelationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("relation repository unavailable: {message}"))
        }
        RelationPersistenceError::Query { message } => {
            Error::internal(format!("relation repository error: {message}"))
        }
        RelationPersistenceError::Duplicate => {
            Error::conflict(format!("recipe is already in {kind}"))
        }
        RelationPersistenceError::Missing => Error::not_found(format!("recipe is not in {kind}")),
    }
}

#[cfg(test)]
#[path = "relation_service_tests.rs"]
mod tests;
