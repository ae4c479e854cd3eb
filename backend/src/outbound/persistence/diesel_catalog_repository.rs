//! PostgreSQL-backed `CatalogRepository` implementation using Diesel.
//!
//! Bulk inserts run inside one transaction so a failed batch leaves the
//! catalog untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::catalog::{Ingredient, Tag};
use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IngredientRow, NewIngredientRow, NewTagRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

/// Diesel-backed implementation of the `CatalogRepository` port.
#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CatalogRepositoryError {
    map_pool_error(error, CatalogRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CatalogRepositoryError {
    map_diesel_error(
        error,
        CatalogRepositoryError::query,
        CatalogRepositoryError::connection,
        CatalogRepositoryError::duplicate,
    )
}

fn row_to_ingredient(row: IngredientRow) -> Ingredient {
    Ingredient {
        id: row.id,
        name: row.name,
        measurement_unit: row.measurement_unit,
    }
}

fn row_to_tag(row: TagRow) -> Tag {
    Tag {
        id: row.id,
        name: row.name,
        slug: row.slug,
    }
}

#[async_trait]
impl CatalogRepository for DieselCatalogRepository {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .order(ingredients::name.asc())
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_ingredient).collect())
    }

    async fn find_ingredient(
        &self,
        id: Uuid,
    ) -> Result<Option<Ingredient>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq(id))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_ingredient))
    }

    async fn find_ingredients_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(ids))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_ingredient).collect())
    }

    async fn insert_ingredients(
        &self,
        items: &[Ingredient],
    ) -> Result<usize, CatalogRepositoryError> {
        let rows: Vec<NewIngredientRow<'_>> = items
            .iter()
            .map(|item| NewIngredientRow {
                id: item.id,
                name: &item.name,
                measurement_unit: &item.measurement_unit,
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(ingredients::table)
                    .values(&rows)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<TagRow> = tags::table
            .order(tags::name.asc())
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_tag).collect())
    }

    async fn find_tag(&self, id: Uuid) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<TagRow> = tags::table
            .filter(tags::id.eq(id))
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_tag))
    }

    async fn find_tags_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<TagRow> = tags::table
            .filter(tags::id.eq_any(ids))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_tag).collect())
    }

    async fn insert_tags(&self, items: &[Tag]) -> Result<usize, CatalogRepositoryError> {
        let rows: Vec<NewTagRow<'_>> = items
            .iter()
            .map(|item| NewTagRow {
                id: item.id,
                name: &item.name,
                slug: &item.slug,
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(tags::table)
                    .values(&rows)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
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
            Box::new("tags_slug_key".to_string()),
        );
        assert!(matches!(
            diesel_error(diesel_err),
            CatalogRepositoryError::Duplicate { .. }
        ));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::build("bad url"));
        assert!(matches!(err, CatalogRepositoryError::Connection { .. }));
    }
}
