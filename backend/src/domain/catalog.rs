//! Ingredient and tag catalog entities.
//!
//! The catalog is static reference data: loaded in bulk by an operator and
//! read-only during normal operation. Recipes hold non-owning references to
//! these rows, so nothing here is ever deleted while referenced.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by catalog constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    /// A required field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name.
        field: &'static str,
    },
    /// Slug contains characters outside lowercase ASCII, digits, and hyphens.
    #[error("slug must contain lowercase ASCII letters, digits, and hyphens")]
    InvalidSlug,
}

/// Ingredient reference data: a unique name plus its measurement unit.
///
/// The unit belongs to the ingredient, not to a recipe line, which is what
/// makes shopping-list amounts summable without unit conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique ingredient name.
    pub name: String,
    /// Measurement unit string, e.g. "г" or "шт.".
    pub measurement_unit: String,
}

impl Ingredient {
    /// Validate and construct an ingredient with a fresh identifier.
    pub fn new(
        name: impl Into<String>,
        measurement_unit: impl Into<String>,
    ) -> Result<Self, CatalogValidationError> {
        let name = non_empty(name.into(), "name")?;
        let measurement_unit = non_empty(measurement_unit.into(), "measurement_unit")?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            measurement_unit,
        })
    }
}

/// Tag reference data: unique name and unique slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// Unique URL slug.
    pub slug: String,
}

impl Tag {
    /// Validate and construct a tag with a fresh identifier.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self, CatalogValidationError> {
        let name = non_empty(name.into(), "name")?;
        let slug = non_empty(slug.into(), "slug")?;
        if !is_valid_slug(&slug) {
            return Err(CatalogValidationError::InvalidSlug);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            slug,
        })
    }
}

/// Bulk-load record for ingredients: `{name, measurement_unit}`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRecord {
    /// Ingredient name.
    pub name: String,
    /// Measurement unit.
    pub measurement_unit: String,
}

/// Bulk-load record for tags: `{name, slug}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagRecord {
    /// Tag name.
    pub name: String,
    /// Tag slug.
    pub slug: String,
}

fn non_empty(value: String, field: &'static str) -> Result<String, CatalogValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogValidationError::EmptyField { field });
    }
    Ok(value)
}

pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("breakfast", true)]
    #[case("low-carb-2", true)]
    #[case("Breakfast", false)]
    #[case("завтрак", false)]
    #[case(" breakfast", false)]
    #[case("", false)]
    fn slug_character_rules(#[case] slug: &str, #[case] ok: bool) {
        assert_eq!(is_valid_slug(slug), ok);
    }

    #[rstest]
    fn tag_rejects_invalid_slug() {
        let err = Tag::new("Breakfast", "Breakfast").expect_err("must reject");
        assert_eq!(err, CatalogValidationError::InvalidSlug);
    }

    #[rstest]
    fn ingredient_requires_a_unit() {
        let err = Ingredient::new("Salt", "  ").expect_err("must reject");
        assert_eq!(
            err,
            CatalogValidationError::EmptyField {
                field: "measurement_unit"
            }
        );
    }
}
