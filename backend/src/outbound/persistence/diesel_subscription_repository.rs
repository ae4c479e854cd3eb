//! PostgreSQL-backed `SubscriptionRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SubscriptionPersistenceError, SubscriptionRepository};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewSubscriptionRow;
use super::pool::{DbPool, PoolError};
use super::schema::subscriptions;

/// Diesel-backed implementation of the `SubscriptionRepository` port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> SubscriptionPersistenceError {
    map_pool_error(error, SubscriptionPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SubscriptionPersistenceError {
    map_diesel_error(
        error,
        SubscriptionPersistenceError::query,
        SubscriptionPersistenceError::connection,
        |_| SubscriptionPersistenceError::Duplicate,
    )
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn add(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), SubscriptionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(subscriptions::table)
            .values(&NewSubscriptionRow {
                follower_id,
                author_id,
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn remove(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), SubscriptionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed = diesel::delete(
            subscriptions::table
                .filter(subscriptions::follower_id.eq(follower_id))
                .filter(subscriptions::author_id.eq(author_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        if removed == 0 {
            return Err(SubscriptionPersistenceError::Missing);
        }
        Ok(())
    }

    async fn authors_for(
        &self,
        follower_id: Uuid,
    ) -> Result<Vec<Uuid>, SubscriptionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        subscriptions::table
            .filter(subscriptions::follower_id.eq(follower_id))
            .order(subscriptions::created_at.asc())
            .select(subscriptions::author_id)
            .load(&mut conn)
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
            Box::new("subscriptions_pkey".to_string()),
        );
        assert_eq!(
            diesel_error(diesel_err),
            SubscriptionPersistenceError::Duplicate
        );
    }
}
