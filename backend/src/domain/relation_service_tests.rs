//! Tests for the relation toggles and the shopping-list aggregation.

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockRecipeRelationRepository, MockRecipeRepository};
use crate::domain::recipe::IngredientLine;
use crate::domain::shopping_list::CartLine;
use crate::domain::ErrorCode;
use chrono::Utc;

fn stored_recipe(id: Uuid) -> Recipe {
    Recipe {
        id,
        author_id: Uuid::new_v4(),
        name: "Soup".into(),
        image: "recipes/soup.png".into(),
        text: "Simmer.".into(),
        cooking_time: 30,
        created_at: Utc::now(),
        short_code: None,
        ingredients: vec![IngredientLine {
            ingredient_id: Uuid::new_v4(),
            amount: 1.0,
        }],
        tags: vec![Uuid::new_v4()],
    }
}

fn toggle_service(
    relations: MockRecipeRelationRepository,
    recipes: MockRecipeRepository,
) -> RelationToggleService {
    RelationToggleService::new(Arc::new(relations), Arc::new(recipes))
}

#[tokio::test]
async fn add_returns_the_recipe_for_the_short_representation() {
    let recipe_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .with(eq(recipe_id))
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id))));
    let mut relations = MockRecipeRelationRepository::new();
    relations
        .expect_add()
        .with(eq(RelationKind::Favorite), eq(user_id), eq(recipe_id))
        .return_once(|_, _, _| Ok(()));

    let service = toggle_service(relations, recipes);
    let recipe = service
        .add(RelationKind::Favorite, user_id, recipe_id)
        .await
        .expect("add succeeds");
    assert_eq!(recipe.id, recipe_id);
}

#[tokio::test]
async fn duplicate_add_is_a_conflict() {
    let recipe_id = Uuid::new_v4();

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id))));
    let mut relations = MockRecipeRelationRepository::new();
    relations
        .expect_add()
        .return_once(|_, _, _| Err(RelationPersistenceError::Duplicate));

    let service = toggle_service(relations, recipes);
    let err = service
        .add(RelationKind::Cart, Uuid::new_v4(), recipe_id)
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn add_of_an_unknown_recipe_is_not_found() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().return_once(|_| Ok(None));
    let mut relations = MockRecipeRelationRepository::new();
    relations.expect_add().times(0);

    let service = toggle_service(relations, recipes);
    let err = service
        .add(RelationKind::Favorite, Uuid::new_v4(), Uuid::new_v4())
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn remove_of_an_absent_pair_is_not_found() {
    let mut relations = MockRecipeRelationRepository::new();
    relations
        .expect_remove()
        .return_once(|_, _, _| Err(RelationPersistenceError::Missing));

    let service = toggle_service(relations, MockRecipeRepository::new());
    let err = service
        .remove(RelationKind::Cart, Uuid::new_v4(), Uuid::new_v4())
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn shopping_list_merges_lines_across_recipes() {
    let user_id = Uuid::new_v4();

    let mut relations = MockRecipeRelationRepository::new();
    relations
        .expect_cart_lines()
        .with(eq(user_id))
        .return_once(|_| {
            Ok(vec![
                CartLine {
                    name: "Sugar".into(),
                    measurement_unit: "g".into(),
                    amount: 100.0,
                },
                CartLine {
                    name: "Flour".into(),
                    measurement_unit: "g".into(),
                    amount: 200.0,
                },
                CartLine {
                    name: "Sugar".into(),
                    measurement_unit: "g".into(),
                    amount: 50.0,
                },
            ])
        });

    let service = ShoppingListService::new(Arc::new(relations));
    let entries = service.entries(user_id).await.expect("entries returned");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Flour");
    assert_eq!(entries[1].name, "Sugar");
    assert!((entries[1].amount - 150.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn empty_cart_yields_an_empty_list() {
    let mut relations = MockRecipeRelationRepository::new();
    relations.expect_cart_lines().return_once(|_| Ok(vec![]));

    let service = ShoppingListService::new(Arc::new(relations));
    let entries = service
        .entries(Uuid::new_v4())
        .await
        .expect("entries returned");
    assert!(entries.is_empty());
}
