//! Recipe payload validation.
//!
//! Pure accept/reject checks applied to a [`RecipeDraft`] before any write.
//! The first failing check wins and is reported with the rejected field
//! (`cooking_time`, `tags`, or `ingredients`) in the error details.

use std::collections::HashSet;

use uuid::Uuid;

use super::Error;
use super::recipe::{MIN_COOKING_TIME, MIN_INGREDIENT_AMOUNT, RecipeDraft};

/// Validate a proposed recipe payload against the declared invariants.
///
/// `known_ingredients` is the set of catalog ingredient ids resolved by the
/// caller; every referenced line must point into it. The function performs
/// no I/O and has no side effects.
pub fn validate_draft(
    draft: &RecipeDraft,
    known_ingredients: &HashSet<Uuid>,
) -> Result<(), Error> {
    if draft.cooking_time < MIN_COOKING_TIME {
        return Err(Error::validation_failed(
            "cooking_time",
            format!("cooking time must be at least {MIN_COOKING_TIME} minute(s)"),
        ));
    }

    if draft.tags.is_empty() {
        return Err(Error::validation_failed(
            "tags",
            "a recipe needs at least one tag",
        ));
    }
    if has_duplicates(draft.tags.iter().copied()) {
        return Err(Error::validation_failed(
            "tags",
            "tags must not repeat within one recipe",
        ));
    }

    if draft.ingredients.is_empty() {
        return Err(Error::validation_failed(
            "ingredients",
            "a recipe needs at least one ingredient",
        ));
    }
    if has_duplicates(draft.ingredients.iter().map(|line| line.ingredient_id)) {
        return Err(Error::validation_failed(
            "ingredients",
            "an ingredient may appear on only one line",
        ));
    }
    if let Some(line) = draft
        .ingredients
        .iter()
        .find(|line| line.amount < MIN_INGREDIENT_AMOUNT)
    {
        return Err(Error::validation_failed(
            "ingredients",
            format!(
                "amount for ingredient {} must be at least {MIN_INGREDIENT_AMOUNT}",
                line.ingredient_id
            ),
        ));
    }
    if let Some(line) = draft
        .ingredients
        .iter()
        .find(|line| !known_ingredients.contains(&line.ingredient_id))
    {
        return Err(Error::validation_failed(
            "ingredients",
            format!("unknown ingredient {}", line.ingredient_id),
        ));
    }

    Ok(())
}

/// True when an error is a validation rejection of the given field.
#[cfg(test)]
pub(crate) fn rejects_field(error: &Error, field: &str) -> bool {
    error.code() == super::ErrorCode::InvalidRequest
        && error
            .details()
            .and_then(|details| details.get("field"))
            .and_then(|value| value.as_str())
            == Some(field)
}

fn has_duplicates(ids: impl Iterator<Item = Uuid>) -> bool {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return true;
        }
    }
    false
}
