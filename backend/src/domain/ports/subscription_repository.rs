//! Port abstraction for the (follower, author) subscription store.

use async_trait::async_trait;
use uuid::Uuid;

/// Persistence errors raised by subscription repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionPersistenceError {
    /// Repository connection could not be established.
    #[error("subscription repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("subscription repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The (follower, author) pair is already present.
    #[error("subscription already exists")]
    Duplicate,
    /// The (follower, author) pair is absent.
    #[error("subscription not found")]
    Missing,
}

impl SubscriptionPersistenceError {
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
}

/// Toggle store for author subscriptions.
///
/// The follower != author business rule is enforced by the service before
/// any call reaches this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert the pair; [`SubscriptionPersistenceError::Duplicate`] when present.
    async fn add(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), SubscriptionPersistenceError>;

    /// Delete the pair; [`SubscriptionPersistenceError::Missing`] when absent.
    async fn remove(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), SubscriptionPersistenceError>;

    /// Authors the given user follows, oldest subscription first.
    async fn authors_for(
        &self,
        follower_id: Uuid,
    ) -> Result<Vec<Uuid>, SubscriptionPersistenceError>;
}
