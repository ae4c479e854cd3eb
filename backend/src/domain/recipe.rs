//! Recipe aggregate: a recipe plus its owned ingredient lines and tag set.
//!
//! The aggregate is one consistency unit. Ingredient lines exist only as
//! children of a recipe and are replaced wholesale on every update, so they
//! carry no identity of their own beyond the (recipe, ingredient) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum accepted cooking time in minutes.
pub const MIN_COOKING_TIME: i32 = 1;

/// Minimum accepted amount on an ingredient line.
pub const MIN_INGREDIENT_AMOUNT: f64 = 1.0;

/// One (ingredient, amount) line owned by a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    /// Catalog ingredient referenced by this line.
    pub ingredient_id: Uuid,
    /// Amount in the ingredient's own measurement unit.
    pub amount: f64,
}

/// Persisted recipe aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning author; set from the acting user, never client-supplied.
    pub author_id: Uuid,
    /// Display name.
    pub name: String,
    /// Blob-store reference for the recipe image.
    pub image: String,
    /// Free-text description.
    pub text: String,
    /// Cooking time in whole minutes.
    pub cooking_time: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lazily generated short-link code, unique when present.
    pub short_code: Option<String>,
    /// Ordered ingredient lines; at least one, no duplicate ingredients.
    pub ingredients: Vec<IngredientLine>,
    /// Referenced tag ids; at least one, no duplicates.
    pub tags: Vec<Uuid>,
}

/// Client-submitted recipe payload, shared by create and update.
///
/// Both `tags` and `ingredients` are mandatory: recipes are always fully
/// replaced on edit, so a partial update omitting either is rejected before
/// it reaches validation. The image is a base64 data URI on create and may
/// be omitted on update to keep the stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    /// Display name.
    pub name: String,
    /// Base64 data URI (`data:image/<ext>;base64,<payload>`), optional on
    /// update.
    pub image: Option<String>,
    /// Free-text description.
    pub text: String,
    /// Cooking time in whole minutes.
    pub cooking_time: i32,
    /// Referenced tag ids.
    pub tags: Vec<Uuid>,
    /// Proposed ingredient lines.
    pub ingredients: Vec<IngredientLine>,
}
