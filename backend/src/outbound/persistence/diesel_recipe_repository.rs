//! PostgreSQL-backed `RecipeRepository` implementation using Diesel.
//!
//! Every aggregate mutation runs inside one transaction: the recipe row,
//! its ingredient lines, and its tag references change together or not at
//! all. `replace` deletes all owned lines and tag references and recreates
//! them from the given aggregate.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::recipe::{IngredientLine, Recipe};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeIngredientRow, RecipeRow,
    RecipeTagRow, RecipeUpdate,
};
use super::pool::{DbPool, PoolError};
use super::schema::{recipe_ingredients, recipe_tags, recipes};

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RecipePersistenceError {
    map_pool_error(error, RecipePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> RecipePersistenceError {
    map_diesel_error(
        error,
        RecipePersistenceError::query,
        RecipePersistenceError::connection,
        RecipePersistenceError::conflict,
    )
}

fn line_rows(recipe: &Recipe) -> Vec<NewRecipeIngredientRow> {
    recipe
        .ingredients
        .iter()
        .enumerate()
        .map(|(position, line)| NewRecipeIngredientRow {
            id: Uuid::new_v4(),
            recipe_id: recipe.id,
            ingredient_id: line.ingredient_id,
            amount: line.amount,
            // Submission order survives storage via an explicit position.
            position: i32::try_from(position).unwrap_or(i32::MAX),
        })
        .collect()
}

fn tag_rows(recipe: &Recipe) -> Vec<NewRecipeTagRow> {
    recipe
        .tags
        .iter()
        .enumerate()
        .map(|(position, tag_id)| NewRecipeTagRow {
            recipe_id: recipe.id,
            tag_id: *tag_id,
            position: i32::try_from(position).unwrap_or(i32::MAX),
        })
        .collect()
}

fn assemble(row: RecipeRow, lines: Vec<RecipeIngredientRow>, tags: Vec<RecipeTagRow>) -> Recipe {
    Recipe {
        id: row.id,
        author_id: row.author_id,
        name: row.name,
        image: row.image,
        text: row.text,
        cooking_time: row.cooking_time,
        created_at: row.created_at,
        short_code: row.short_code,
        ingredients: lines
            .into_iter()
            .map(|line| IngredientLine {
                ingredient_id: line.ingredient_id,
                amount: line.amount,
            })
            .collect(),
        tags: tags.into_iter().map(|tag| tag.tag_id).collect(),
    }
}

impl DieselRecipeRepository {
    async fn load_children(
        conn: &mut diesel_async::pooled_connection::bb8::PooledConnection<
            '_,
            diesel_async::AsyncPgConnection,
        >,
        recipe_ids: &[Uuid],
    ) -> Result<(Vec<RecipeIngredientRow>, Vec<RecipeTagRow>), diesel::result::Error> {
        let lines: Vec<RecipeIngredientRow> = recipe_ingredients::table
            .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
            .order(recipe_ingredients::position.asc())
            .select(RecipeIngredientRow::as_select())
            .load(conn)
            .await?;
        let tags: Vec<RecipeTagRow> = recipe_tags::table
            .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
            .order(recipe_tags::position.asc())
            .select(RecipeTagRow::as_select())
            .load(conn)
            .await?;
        Ok((lines, tags))
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let row = NewRecipeRow {
            id: recipe.id,
            author_id: recipe.author_id,
            name: &recipe.name,
            image: &recipe.image,
            text: &recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at,
            short_code: recipe.short_code.as_deref(),
        };
        let lines = line_rows(recipe);
        let tags = tag_rows(recipe);
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(recipes::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(recipe_ingredients::table)
                    .values(&lines)
                    .execute(conn)
                    .await?;
                diesel::insert_into(recipe_tags::table)
                    .values(&tags)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn replace(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let update = RecipeUpdate {
            name: &recipe.name,
            image: &recipe.image,
            text: &recipe.text,
            cooking_time: recipe.cooking_time,
        };
        let recipe_id = recipe.id;
        let lines = line_rows(recipe);
        let tags = tag_rows(recipe);
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let replaced = conn
            .transaction(|conn| {
                async move {
                    let updated =
                        diesel::update(recipes::table.filter(recipes::id.eq(recipe_id)))
                            .set(&update)
                            .execute(conn)
                            .await?;
                    if updated == 0 {
                        return Ok(false);
                    }
                    diesel::delete(
                        recipe_ingredients::table
                            .filter(recipe_ingredients::recipe_id.eq(recipe_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(
                        recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::insert_into(recipe_ingredients::table)
                        .values(&lines)
                        .execute(conn)
                        .await?;
                    diesel::insert_into(recipe_tags::table)
                        .values(&tags)
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;
        if !replaced {
            return Err(RecipePersistenceError::Missing);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(
                        recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(recipes::table.filter(recipes::id.eq(id)))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;
        if deleted == 0 {
            return Err(RecipePersistenceError::Missing);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let (lines, tags) = Self::load_children(&mut conn, &[id])
            .await
            .map_err(diesel_error)?;
        Ok(Some(assemble(row, lines, tags)))
    }

    async fn list_recent(
        &self,
        author_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = recipes::table
            .select(RecipeRow::as_select())
            .into_boxed();
        if let Some(author_id) = author_id {
            query = query.filter(recipes::author_id.eq(author_id));
        }
        let rows: Vec<RecipeRow> = query
            .order(recipes::created_at.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let (lines, tags) = Self::load_children(&mut conn, &ids)
            .await
            .map_err(diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let recipe_id = row.id;
                let own_lines = lines
                    .iter()
                    .filter(|line| line.recipe_id == recipe_id)
                    .cloned()
                    .collect();
                let own_tags = tags
                    .iter()
                    .filter(|tag| tag.recipe_id == recipe_id)
                    .cloned()
                    .collect();
                assemble(row, own_lines, own_tags)
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<i64, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        recipes::table
            .filter(recipes::author_id.eq(author_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }

    async fn set_short_code(&self, id: Uuid, code: &str) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(recipes::table.filter(recipes::id.eq(id)))
            .set(recipes::short_code.eq(code))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(RecipePersistenceError::Missing);
        }
        Ok(())
    }

    async fn find_by_short_code(
        &self,
        code: &str,
    ) -> Result<Option<Uuid>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        recipes::table
            .filter(recipes::short_code.eq(code))
            .select(recipes::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn recipe_with_lines(count: usize) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            name: "Bread".into(),
            image: "recipes/abc.png".into(),
            text: "Knead and bake.".into(),
            cooking_time: 90,
            created_at: Utc::now(),
            short_code: None,
            ingredients: (0..count)
                .map(|index| IngredientLine {
                    ingredient_id: Uuid::new_v4(),
                    amount: (index + 1) as f64,
                })
                .collect(),
            tags: vec![Uuid::new_v4(), Uuid::new_v4()],
        }
    }

    #[rstest]
    fn line_rows_preserve_submission_order() {
        let recipe = recipe_with_lines(3);
        let rows = line_rows(&recipe);
        let positions: Vec<i32> = rows.iter().map(|row| row.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(rows[1].ingredient_id, recipe.ingredients[1].ingredient_id);
    }

    #[rstest]
    fn tag_rows_preserve_submission_order() {
        let recipe = recipe_with_lines(1);
        let rows = tag_rows(&recipe);
        assert_eq!(rows[0].tag_id, recipe.tags[0]);
        assert_eq!(rows[1].position, 1);
    }

    #[rstest]
    fn unique_violation_maps_to_conflict() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("recipes_short_code_key".to_string()),
        );
        assert!(matches!(
            diesel_error(diesel_err),
            RecipePersistenceError::Conflict { .. }
        ));
    }
}
