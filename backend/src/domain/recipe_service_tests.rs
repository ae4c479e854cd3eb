//! Tests for the recipe aggregate service.

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockBlobStore, MockCatalogRepository, MockRecipeRepository, MockUserRepository,
};
use crate::domain::recipe::IngredientLine;
use crate::domain::user::{Email, Username};

const PNG_URI: &str = "data:image/png;base64,aGVsbG8=";

struct Fixture {
    recipes: MockRecipeRepository,
    catalog: MockCatalogRepository,
    users: MockUserRepository,
    blobs: MockBlobStore,
}

impl Fixture {
    fn new() -> Self {
        Self {
            recipes: MockRecipeRepository::new(),
            catalog: MockCatalogRepository::new(),
            users: MockUserRepository::new(),
            blobs: MockBlobStore::new(),
        }
    }

    fn service(self) -> RecipeService {
        RecipeService::new(
            Arc::new(self.recipes),
            Arc::new(self.catalog),
            Arc::new(self.users),
            Arc::new(self.blobs),
        )
    }
}

fn ingredient(id: Uuid, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.into(),
        measurement_unit: unit.into(),
    }
}

fn tag(id: Uuid, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_uppercase(),
        slug: slug.into(),
    }
}

fn draft(tags: Vec<Uuid>, ingredients: Vec<IngredientLine>) -> RecipeDraft {
    RecipeDraft {
        name: "Bread".into(),
        image: Some(PNG_URI.into()),
        text: "Knead and bake.".into(),
        cooking_time: 90,
        tags,
        ingredients,
    }
}

fn author_profile(id: Uuid) -> User {
    let mut user = User::register(
        Email::new("chef@example.com").expect("valid email"),
        Username::new("chef").expect("valid username"),
        "Julia",
        "Child",
    )
    .expect("valid user");
    user.id = id;
    user
}

fn stored_recipe(id: Uuid, author_id: Uuid) -> Recipe {
    Recipe {
        id,
        author_id,
        name: "Bread".into(),
        image: "recipes/abc.png".into(),
        text: "Knead and bake.".into(),
        cooking_time: 90,
        created_at: Utc::now(),
        short_code: None,
        ingredients: vec![IngredientLine {
            ingredient_id: Uuid::new_v4(),
            amount: 2.0,
        }],
        tags: vec![Uuid::new_v4()],
    }
}

#[tokio::test]
async fn create_persists_lines_in_submission_order() {
    let salt = Uuid::new_v4();
    let flour = Uuid::new_v4();
    let tag_id = Uuid::new_v4();
    let author = Uuid::new_v4();
    let lines = vec![
        IngredientLine {
            ingredient_id: salt,
            amount: 5.0,
        },
        IngredientLine {
            ingredient_id: flour,
            amount: 200.0,
        },
    ];

    let mut fixture = Fixture::new();
    fixture
        .catalog
        .expect_find_ingredients_by_ids()
        .return_once(move |_| {
            Ok(vec![
                ingredient(salt, "Salt", "g"),
                ingredient(flour, "Flour", "g"),
            ])
        });
    fixture
        .catalog
        .expect_find_tags_by_ids()
        .return_once(move |_| Ok(vec![tag(tag_id, "baking")]));
    fixture
        .blobs
        .expect_save()
        .return_once(|_, _, _| Ok("recipes/abc.png".into()));
    fixture
        .recipes
        .expect_insert()
        .times(1)
        .withf(move |recipe: &Recipe| {
            recipe.ingredients
                == vec![
                    IngredientLine {
                        ingredient_id: salt,
                        amount: 5.0,
                    },
                    IngredientLine {
                        ingredient_id: flour,
                        amount: 200.0,
                    },
                ]
        })
        .return_once(|_| Ok(()));

    let service = fixture.service();
    let created = service
        .create(author, draft(vec![tag_id], lines))
        .await
        .expect("create succeeds");
    assert_eq!(created.author_id, author);
    assert_eq!(created.image, "recipes/abc.png");
}

#[tokio::test]
async fn create_rejects_small_cooking_time_before_any_write() {
    let salt = Uuid::new_v4();
    let mut fixture = Fixture::new();
    fixture
        .catalog
        .expect_find_ingredients_by_ids()
        .return_once(move |_| Ok(vec![ingredient(salt, "Salt", "g")]));
    fixture.recipes.expect_insert().times(0);

    let mut payload = draft(
        vec![Uuid::new_v4()],
        vec![IngredientLine {
            ingredient_id: salt,
            amount: 5.0,
        }],
    );
    payload.cooking_time = 0;

    let service = fixture.service();
    let err = service
        .create(Uuid::new_v4(), payload)
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some("cooking_time"));
}

#[tokio::test]
async fn create_rejects_unknown_tags() {
    let salt = Uuid::new_v4();
    let mut fixture = Fixture::new();
    fixture
        .catalog
        .expect_find_ingredients_by_ids()
        .return_once(move |_| Ok(vec![ingredient(salt, "Salt", "g")]));
    fixture
        .catalog
        .expect_find_tags_by_ids()
        .return_once(|_| Ok(vec![]));
    fixture.recipes.expect_insert().times(0);

    let payload = draft(
        vec![Uuid::new_v4()],
        vec![IngredientLine {
            ingredient_id: salt,
            amount: 5.0,
        }],
    );
    let service = fixture.service();
    let err = service
        .create(Uuid::new_v4(), payload)
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some("tags"));
}

#[tokio::test]
async fn list_narrows_to_the_requested_author() {
    let author = Uuid::new_v4();
    let recipe_id = Uuid::new_v4();

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_list_recent()
        .withf(move |filter, _| *filter == Some(author))
        .return_once(move |_, _| Ok(vec![stored_recipe(recipe_id, author)]));
    fixture
        .users
        .expect_find_by_id()
        .with(eq(author))
        .return_once(|id| Ok(Some(author_profile(id))));
    fixture
        .catalog
        .expect_find_tags_by_ids()
        .return_once(|_| Ok(vec![]));
    fixture
        .catalog
        .expect_find_ingredients_by_ids()
        .return_once(|_| Ok(vec![]));

    let service = fixture.service();
    let views = service.list(Some(author)).await.expect("list returned");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].recipe.id, recipe_id);
    assert_eq!(views[0].author.id, author);
}

#[tokio::test]
async fn unfiltered_list_caps_the_page_size() {
    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_list_recent()
        .withf(|filter, limit| filter.is_none() && *limit == RECIPE_LIST_LIMIT)
        .return_once(|_, _| Ok(vec![]));

    let service = fixture.service();
    let views = service.list(None).await.expect("list returned");
    assert!(views.is_empty());
}

#[tokio::test]
async fn update_by_non_author_is_forbidden_and_writes_nothing() {
    let recipe_id = Uuid::new_v4();
    let author = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_id()
        .with(eq(recipe_id))
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id, author))));
    fixture.recipes.expect_replace().times(0);

    let service = fixture.service();
    let err = service
        .update(intruder, recipe_id, draft(vec![Uuid::new_v4()], vec![]))
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_without_image_keeps_the_stored_reference() {
    let recipe_id = Uuid::new_v4();
    let author = Uuid::new_v4();
    let salt = Uuid::new_v4();
    let tag_id = Uuid::new_v4();

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id, author))));
    fixture
        .catalog
        .expect_find_ingredients_by_ids()
        .return_once(move |_| Ok(vec![ingredient(salt, "Salt", "g")]));
    fixture
        .catalog
        .expect_find_tags_by_ids()
        .return_once(move |_| Ok(vec![tag(tag_id, "baking")]));
    fixture
        .recipes
        .expect_replace()
        .withf(|recipe: &Recipe| recipe.image == "recipes/abc.png")
        .return_once(|_| Ok(()));

    let mut payload = draft(
        vec![tag_id],
        vec![IngredientLine {
            ingredient_id: salt,
            amount: 5.0,
        }],
    );
    payload.image = None;

    let service = fixture.service();
    let updated = service
        .update(author, recipe_id, payload)
        .await
        .expect("update succeeds");
    assert_eq!(updated.image, "recipes/abc.png");
}

#[tokio::test]
async fn delete_by_non_author_is_forbidden() {
    let recipe_id = Uuid::new_v4();
    let author = Uuid::new_v4();

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id, author))));
    fixture.recipes.expect_delete().times(0);

    let service = fixture.service();
    let err = service
        .delete(Uuid::new_v4(), recipe_id)
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn short_link_reuses_a_stored_code() {
    let recipe_id = Uuid::new_v4();
    let mut stored = stored_recipe(recipe_id, Uuid::new_v4());
    stored.short_code = Some("cafe1234".into());

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    fixture.recipes.expect_set_short_code().times(0);

    let service = fixture.service();
    let code = service.short_link(recipe_id).await.expect("code returned");
    assert_eq!(code, "cafe1234");
}

#[tokio::test]
async fn short_link_derives_a_deterministic_truncated_hash() {
    let recipe_id = Uuid::new_v4();
    let expected = hex::encode(Sha256::digest(recipe_id.as_bytes()))[..8].to_owned();

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id, Uuid::new_v4()))));
    let persisted = expected.clone();
    fixture
        .recipes
        .expect_set_short_code()
        .withf(move |_, code| code == persisted)
        .return_once(|_, _| Ok(()));

    let service = fixture.service();
    let code = service.short_link(recipe_id).await.expect("code returned");
    assert_eq!(code, expected);
}

#[tokio::test]
async fn short_link_widens_the_code_on_collision() {
    let recipe_id = Uuid::new_v4();
    let digest = hex::encode(Sha256::digest(recipe_id.as_bytes()));
    let wide = digest[..16].to_owned();

    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_recipe(recipe_id, Uuid::new_v4()))));
    let mut calls = 0_u32;
    fixture
        .recipes
        .expect_set_short_code()
        .times(2)
        .returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Err(RecipePersistenceError::conflict("short code taken"))
            } else {
                Ok(())
            }
        });

    let service = fixture.service();
    let code = service.short_link(recipe_id).await.expect("code returned");
    assert_eq!(code, wide);
}

#[tokio::test]
async fn resolve_short_link_rejects_unknown_codes() {
    let mut fixture = Fixture::new();
    fixture
        .recipes
        .expect_find_by_short_code()
        .return_once(|_| Ok(None));

    let service = fixture.service();
    let err = service
        .resolve_short_link("deadbeef")
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
