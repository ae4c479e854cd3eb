//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{Email, User, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
        UserPersistenceError::duplicate,
    )
}

/// Convert a database row to a domain user.
///
/// Stored rows passed domain validation on the way in, so a row that no
/// longer parses indicates schema drift and maps to a query error.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email =
        Email::new(row.email).map_err(|_| UserPersistenceError::query("stored email invalid"))?;
    let username = Username::new(row.username)
        .map_err(|_| UserPersistenceError::query("stored username invalid"))?;
    Ok(User {
        id: row.id,
        email,
        username,
        first_name: row.first_name,
        last_name: row.last_name,
        avatar: row.avatar,
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewUserRow {
            id: user.id,
            email: user.email.as_str(),
            username: user.username.as_str(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            avatar: user.avatar.as_deref(),
            created_at: user.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn set_avatar(
        &self,
        id: Uuid,
        avatar: Option<String>,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(id)))
            .set(users::avatar.eq(avatar))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(UserPersistenceError::Missing);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("users_email_key".to_string()),
        );
        assert!(matches!(
            diesel_error(diesel_err),
            UserPersistenceError::Duplicate { .. }
        ));
    }

    #[rstest]
    fn row_round_trips_to_a_domain_user() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "chef@example.com".into(),
            username: "chef".into(),
            first_name: "Julia".into(),
            last_name: "Child".into(),
            avatar: Some("avatars/abc.png".into()),
            created_at: Utc::now(),
        };
        let user = row_to_user(row).expect("row converts");
        assert_eq!(user.email.as_str(), "chef@example.com");
        assert_eq!(user.avatar.as_deref(), Some("avatars/abc.png"));
    }
}
