//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email.
        email -> Varchar,
        /// Unique public handle.
        username -> Varchar,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Blob-store reference for the avatar, when uploaded.
        avatar -> Nullable<Text>,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Static ingredient catalog.
    ingredients (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique ingredient name.
        name -> Varchar,
        /// Measurement unit owned by the ingredient.
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    /// Static tag catalog.
    tags (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique display name.
        name -> Varchar,
        /// Unique URL slug.
        slug -> Varchar,
    }
}

diesel::table! {
    /// Recipe aggregate roots.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning author.
        author_id -> Uuid,
        /// Recipe title.
        name -> Varchar,
        /// Blob-store reference for the recipe image.
        image -> Text,
        /// Preparation instructions.
        text -> Text,
        /// Cooking time in minutes.
        cooking_time -> Int4,
        /// Publication timestamp.
        created_at -> Timestamptz,
        /// Unique short-link code, assigned lazily.
        short_code -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Ingredient lines owned by a recipe.
    recipe_ingredients (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning recipe.
        recipe_id -> Uuid,
        /// Referenced catalog ingredient.
        ingredient_id -> Uuid,
        /// Amount in the ingredient's unit.
        amount -> Float8,
        /// Zero-based position preserving submission order.
        position -> Int4,
    }
}

diesel::table! {
    /// Tag references owned by a recipe.
    recipe_tags (recipe_id, tag_id) {
        /// Owning recipe.
        recipe_id -> Uuid,
        /// Referenced catalog tag.
        tag_id -> Uuid,
        /// Zero-based position preserving submission order.
        position -> Int4,
    }
}

diesel::table! {
    /// Unique (user, recipe) bookmark pairs.
    favorites (user_id, recipe_id) {
        /// Bookmarking user.
        user_id -> Uuid,
        /// Bookmarked recipe.
        recipe_id -> Uuid,
        /// When the pair was added.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique (user, recipe) shopping-cart pairs.
    shopping_carts (user_id, recipe_id) {
        /// Cart owner.
        user_id -> Uuid,
        /// Queued recipe.
        recipe_id -> Uuid,
        /// When the pair was added.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique (follower, author) subscription pairs.
    subscriptions (follower_id, author_id) {
        /// Following user.
        follower_id -> Uuid,
        /// Followed author.
        author_id -> Uuid,
        /// When the subscription was created.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(shopping_carts -> recipes (recipe_id));
diesel::joinable!(shopping_carts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    tags,
    recipes,
    recipe_ingredients,
    recipe_tags,
    favorites,
    shopping_carts,
    subscriptions,
);
