//! Port abstraction for user persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::User;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Unique email or username already taken.
    #[error("user already exists: {message}")]
    Duplicate {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The targeted user does not exist.
    #[error("user not found")]
    Missing,
}

impl UserPersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Persistence contract for user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; [`UserPersistenceError::Duplicate`] on a taken
    /// email or username.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// List every registered profile, ordered by username.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by login email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Set or clear the avatar reference;
    /// [`UserPersistenceError::Missing`] when the id is unknown.
    async fn set_avatar(
        &self,
        id: Uuid,
        avatar: Option<String>,
    ) -> Result<(), UserPersistenceError>;
}
