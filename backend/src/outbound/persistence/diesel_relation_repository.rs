//! PostgreSQL-backed `RecipeRelationRepository` implementation using Diesel.
//!
//! Favorites and shopping-cart entries live in separate tables with the
//! same shape; the port's [`RelationKind`] picks the table per call.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    RecipeRelationRepository, RelationKind, RelationPersistenceError,
};
use crate::domain::shopping_list::CartLine;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewFavoriteRow, NewShoppingCartRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, ingredients, recipe_ingredients, shopping_carts};

/// Diesel-backed implementation of the `RecipeRelationRepository` port.
#[derive(Clone)]
pub struct DieselRelationRepository {
    pool: DbPool,
}

impl DieselRelationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RelationPersistenceError {
    map_pool_error(error, RelationPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> RelationPersistenceError {
    map_diesel_error(
        error,
        RelationPersistenceError::query,
        RelationPersistenceError::connection,
        |_| RelationPersistenceError::Duplicate,
    )
}

#[async_trait]
impl RecipeRelationRepository for DieselRelationRepository {
    async fn add(
        &self,
        kind: RelationKind,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), RelationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let inserted = match kind {
            RelationKind::Favorite => {
                diesel::insert_into(favorites::table)
                    .values(&NewFavoriteRow { user_id, recipe_id })
                    .execute(&mut conn)
                    .await
            }
            RelationKind::Cart => {
                diesel::insert_into(shopping_carts::table)
                    .values(&NewShoppingCartRow { user_id, recipe_id })
                    .execute(&mut conn)
                    .await
            }
        };
        inserted.map(|_| ()).map_err(diesel_error)
    }

    async fn remove(
        &self,
        kind: RelationKind,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), RelationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed = match kind {
            RelationKind::Favorite => {
                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await
            }
            RelationKind::Cart => {
                diesel::delete(
                    shopping_carts::table
                        .filter(shopping_carts::user_id.eq(user_id))
                        .filter(shopping_carts::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map_err(diesel_error)?;
        if removed == 0 {
            return Err(RelationPersistenceError::Missing);
        }
        Ok(())
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RelationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let recipe_ids: Vec<Uuid> = shopping_carts::table
            .filter(shopping_carts::user_id.eq(user_id))
            .select(shopping_carts::recipe_id)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(String, String, f64)> = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| CartLine {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("favorites_pkey".to_string()),
        );
        assert_eq!(
            diesel_error(diesel_err),
            RelationPersistenceError::Duplicate
        );
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, RelationPersistenceError::Connection { .. }));
    }
}
