//! Recipe aggregate use-cases: create, update, delete, read, short links.
//!
//! All validation and authorization checks happen before any write; the
//! repository persists each aggregate change as one transaction, so no
//! partial recipe state is ever stored.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use super::catalog::{Ingredient, Tag};
use super::image::decode_data_uri;
use super::ports::{
    BlobStore, BlobStoreError, CatalogRepository, CatalogRepositoryError, RecipePersistenceError,
    RecipeRepository, UserPersistenceError, UserRepository,
};
use super::recipe::{Recipe, RecipeDraft};
use super::recipe_validation::validate_draft;
use super::user::User;
use super::Error;

/// Blob-store namespace for recipe images.
const RECIPE_IMAGE_NAMESPACE: &str = "recipes";

/// Short-code lengths tried in order; a storage conflict on one widens to
/// the next instead of failing the first link request.
const SHORT_CODE_LENGTHS: [usize; 3] = [8, 16, 32];

/// Upper bound on one browse listing.
const RECIPE_LIST_LIMIT: i64 = 100;

/// A recipe joined with the catalog and author data handlers render from.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    /// The aggregate itself.
    pub recipe: Recipe,
    /// The owning author's profile.
    pub author: User,
    /// Referenced tags, in the recipe's tag order.
    pub tags: Vec<Tag>,
    /// Ingredient lines joined with catalog rows, in line order.
    pub ingredients: Vec<(Ingredient, f64)>,
}

/// Driving service for the recipe aggregate.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    catalog: Arc<dyn CatalogRepository>,
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl RecipeService {
    /// Create a new service over the given adapters.
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        catalog: Arc<dyn CatalogRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            recipes,
            catalog,
            users,
            blobs,
        }
    }

    /// Validate and persist a new recipe owned by `author_id`.
    ///
    /// The author always comes from the acting user, never from the payload.
    pub async fn create(&self, author_id: Uuid, draft: RecipeDraft) -> Result<Recipe, Error> {
        self.check_draft(&draft).await?;
        let image_uri = draft
            .image
            .as_deref()
            .ok_or_else(|| Error::validation_failed("image", "an image is required"))?;
        let image = self.store_image(image_uri).await?;

        let recipe = Recipe {
            id: Uuid::new_v4(),
            author_id,
            name: draft.name,
            image,
            text: draft.text,
            cooking_time: draft.cooking_time,
            created_at: Utc::now(),
            short_code: None,
            ingredients: draft.ingredients,
            tags: draft.tags,
        };
        self.recipes
            .insert(&recipe)
            .await
            .map_err(map_recipe_error)?;
        debug!(recipe_id = %recipe.id, author_id = %author_id, "recipe created");
        Ok(recipe)
    }

    /// Validate and fully replace an existing recipe.
    ///
    /// Only the author may update; ingredient lines and tags are replaced
    /// wholesale. Omitting the image keeps the stored one.
    pub async fn update(
        &self,
        acting_user: Uuid,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error> {
        let existing = self.require_recipe(recipe_id).await?;
        if existing.author_id != acting_user {
            return Err(Error::forbidden("only the author may edit this recipe"));
        }
        self.check_draft(&draft).await?;

        let image = match draft.image.as_deref() {
            Some(uri) => self.store_image(uri).await?,
            None => existing.image,
        };
        let recipe = Recipe {
            id: existing.id,
            author_id: existing.author_id,
            name: draft.name,
            image,
            text: draft.text,
            cooking_time: draft.cooking_time,
            created_at: existing.created_at,
            short_code: existing.short_code,
            ingredients: draft.ingredients,
            tags: draft.tags,
        };
        self.recipes
            .replace(&recipe)
            .await
            .map_err(map_recipe_error)?;
        debug!(recipe_id = %recipe.id, "recipe replaced");
        Ok(recipe)
    }

    /// Delete a recipe and its owned ingredient lines.
    pub async fn delete(&self, acting_user: Uuid, recipe_id: Uuid) -> Result<(), Error> {
        let existing = self.require_recipe(recipe_id).await?;
        if existing.author_id != acting_user {
            return Err(Error::forbidden("only the author may delete this recipe"));
        }
        self.recipes
            .delete(recipe_id)
            .await
            .map_err(map_recipe_error)
    }

    /// List the newest recipes joined with author and catalog data,
    /// optionally narrowed to one author.
    pub async fn list(&self, author: Option<Uuid>) -> Result<Vec<RecipeView>, Error> {
        let recipes = self
            .recipes
            .list_recent(author, RECIPE_LIST_LIMIT)
            .await
            .map_err(map_recipe_error)?;
        let mut views = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            views.push(self.assemble_view(recipe).await?);
        }
        Ok(views)
    }

    /// Fetch one recipe joined with author and catalog data.
    pub async fn view(&self, recipe_id: Uuid) -> Result<RecipeView, Error> {
        let recipe = self.require_recipe(recipe_id).await?;
        self.assemble_view(recipe).await
    }

    /// Join an already-loaded aggregate with author and catalog data.
    pub async fn assemble_view(&self, recipe: Recipe) -> Result<RecipeView, Error> {
        let author = self
            .users
            .find_by_id(recipe.author_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::internal("recipe author missing from user store"))?;

        let tags = self
            .catalog
            .find_tags_by_ids(&recipe.tags)
            .await
            .map_err(map_catalog_error)?;
        let tag_index: HashMap<Uuid, Tag> = tags.into_iter().map(|tag| (tag.id, tag)).collect();
        let tags = recipe
            .tags
            .iter()
            .filter_map(|id| tag_index.get(id).cloned())
            .collect();

        let line_ids: Vec<Uuid> = recipe
            .ingredients
            .iter()
            .map(|line| line.ingredient_id)
            .collect();
        let catalog_rows = self
            .catalog
            .find_ingredients_by_ids(&line_ids)
            .await
            .map_err(map_catalog_error)?;
        let ingredient_index: HashMap<Uuid, Ingredient> = catalog_rows
            .into_iter()
            .map(|row| (row.id, row))
            .collect();
        let ingredients = recipe
            .ingredients
            .iter()
            .filter_map(|line| {
                ingredient_index
                    .get(&line.ingredient_id)
                    .map(|row| (row.clone(), line.amount))
            })
            .collect();

        Ok(RecipeView {
            recipe,
            author,
            tags,
            ingredients,
        })
    }

    /// Return the recipe's short code, deriving and persisting it on first
    /// request.
    ///
    /// The code is the recipe id's SHA-256 digest in hex, truncated to 8
    /// characters. A truncated hash can collide, so a storage conflict
    /// widens the code and retries rather than failing the request.
    pub async fn short_link(&self, recipe_id: Uuid) -> Result<String, Error> {
        let recipe = self.require_recipe(recipe_id).await?;
        if let Some(code) = recipe.short_code {
            return Ok(code);
        }

        let digest = hex::encode(Sha256::digest(recipe.id.as_bytes()));
        for length in SHORT_CODE_LENGTHS {
            let code = &digest[..length];
            match self.recipes.set_short_code(recipe_id, code).await {
                Ok(()) => return Ok(code.to_owned()),
                Err(RecipePersistenceError::Conflict { message }) => {
                    debug!(recipe_id = %recipe_id, length, %message, "short code taken, widening");
                }
                Err(err) => return Err(map_recipe_error(err)),
            }
        }
        Err(Error::conflict("could not allocate a unique short code"))
    }

    /// Resolve a short code to the recipe it identifies.
    pub async fn resolve_short_link(&self, code: &str) -> Result<Uuid, Error> {
        self.recipes
            .find_by_short_code(code)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Error::not_found("unknown short link"))
    }

    /// Fetch the aggregate or reject with `not_found`.
    pub async fn require_recipe(&self, recipe_id: Uuid) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(recipe_id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Error::not_found("recipe not found"))
    }

    /// Run the pure payload validation plus the catalog existence checks.
    async fn check_draft(&self, draft: &RecipeDraft) -> Result<(), Error> {
        let line_ids: Vec<Uuid> = draft
            .ingredients
            .iter()
            .map(|line| line.ingredient_id)
            .collect();
        let known: HashSet<Uuid> = self
            .catalog
            .find_ingredients_by_ids(&line_ids)
            .await
            .map_err(map_catalog_error)?
            .into_iter()
            .map(|row| row.id)
            .collect();
        validate_draft(draft, &known)?;

        let found_tags = self
            .catalog
            .find_tags_by_ids(&draft.tags)
            .await
            .map_err(map_catalog_error)?;
        if found_tags.len() != draft.tags.len() {
            let found: HashSet<Uuid> = found_tags.into_iter().map(|tag| tag.id).collect();
            let missing: Vec<String> = draft
                .tags
                .iter()
                .filter(|id| !found.contains(id))
                .map(ToString::to_string)
                .collect();
            return Err(Error::validation_failed("tags", "unknown tag")
                .with_details(json!({ "field": "tags", "missing": missing })));
        }
        Ok(())
    }

    async fn store_image(&self, data_uri: &str) -> Result<String, Error> {
        let decoded = decode_data_uri(data_uri)
            .map_err(|err| Error::validation_failed("image", err.to_string()))?;
        self.blobs
            .save(RECIPE_IMAGE_NAMESPACE, &decoded.extension, decoded.bytes)
            .await
            .map_err(map_blob_error)
    }
}

pub(crate) fn map_recipe_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipePersistenceError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipePersistenceError::Conflict { message } => Error::conflict(message),
        RecipePersistenceError::Missing => Error::not_found("recipe not found"),
    }
}

pub(crate) fn map_catalog_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
        CatalogRepositoryError::Duplicate { message } => Error::conflict(message),
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { message } => Error::conflict(message),
        UserPersistenceError::Missing => Error::not_found("user not found"),
    }
}

fn map_blob_error(error: BlobStoreError) -> Error {
    match error {
        BlobStoreError::Write { message } => {
            Error::service_unavailable(format!("blob store unavailable: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
