//! Author subscriptions: subscribe, unsubscribe, and the follow list.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::ports::{
    RecipeRepository, SubscriptionPersistenceError, SubscriptionRepository, UserRepository,
};
use super::recipe::Recipe;
use super::recipe_service::{map_recipe_error, map_user_error};
use super::user::User;
use super::Error;

/// How many of the author's recipes a subscription entry previews.
const SUBSCRIPTION_PREVIEW_RECIPES: i64 = 3;

/// One entry in a user's follow list: the author plus a recipe preview.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionView {
    /// The followed author's profile.
    pub author: User,
    /// The author's newest recipes, at most three.
    pub recipes: Vec<Recipe>,
    /// The author's total recipe count.
    pub recipes_count: i64,
}

/// Driving service for the (follower, author) subscription relation.
#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: Arc<dyn SubscriptionRepository>,
    users: Arc<dyn UserRepository>,
    recipes: Arc<dyn RecipeRepository>,
}

impl SubscriptionService {
    /// Create a new service over the given adapters.
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        users: Arc<dyn UserRepository>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            subscriptions,
            users,
            recipes,
        }
    }

    /// Follow an author.
    ///
    /// Self-subscription is rejected before any write. Following an
    /// author twice is a conflict.
    pub async fn subscribe(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<SubscriptionView, Error> {
        if follower_id == author_id {
            return Err(
                Error::conflict("subscribing to yourself is not allowed")
                    .with_details(json!({ "code": "self_subscription" })),
            );
        }
        let author = self.require_user(author_id).await?;
        self.subscriptions
            .add(follower_id, author_id)
            .await
            .map_err(map_subscription_error)?;
        debug!(%follower_id, %author_id, "subscription added");
        self.view_for(author).await
    }

    /// Unfollow an author; `not_found` when not currently following.
    pub async fn unsubscribe(&self, follower_id: Uuid, author_id: Uuid) -> Result<(), Error> {
        self.subscriptions
            .remove(follower_id, author_id)
            .await
            .map_err(map_subscription_error)?;
        debug!(%follower_id, %author_id, "subscription removed");
        Ok(())
    }

    /// The user's follow list, oldest subscription first, each entry with
    /// a recipe preview.
    pub async fn subscriptions(&self, follower_id: Uuid) -> Result<Vec<SubscriptionView>, Error> {
        let author_ids = self
            .subscriptions
            .authors_for(follower_id)
            .await
            .map_err(map_subscription_error)?;
        let mut views = Vec::with_capacity(author_ids.len());
        for author_id in author_ids {
            let author = self.require_user(author_id).await?;
            views.push(self.view_for(author).await?);
        }
        Ok(views)
    }

    async fn require_user(&self, id: Uuid) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn view_for(&self, author: User) -> Result<SubscriptionView, Error> {
        let recipes = self
            .recipes
            .list_recent(Some(author.id), SUBSCRIPTION_PREVIEW_RECIPES)
            .await
            .map_err(map_recipe_error)?;
        let recipes_count = self
            .recipes
            .count_by_author(author.id)
            .await
            .map_err(map_recipe_error)?;
        Ok(SubscriptionView {
            author,
            recipes,
            recipes_count,
        })
    }
}

fn map_subscription_error(error: SubscriptionPersistenceError) -> Error {
    match error {
        SubscriptionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionPersistenceError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
        SubscriptionPersistenceError::Duplicate => {
            Error::conflict("already subscribed to this author")
        }
        SubscriptionPersistenceError::Missing => {
            Error::not_found("not subscribed to this author")
        }
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;
