//! User registration, profile lookup, avatar management, and login.
//!
//! Identity stays deliberately thin: the session cookie carries the user
//! id and login only resolves the account behind an email. Credential
//! verification belongs to the external identity provider.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::image::decode_data_uri;
use super::ports::{BlobStore, UserPersistenceError, UserRepository};
use super::recipe_service::map_user_error;
use super::user::{Email, User, UserValidationError, Username};
use super::Error;

/// Blob-store namespace for avatar images.
const AVATAR_NAMESPACE: &str = "avatars";

/// Raw registration payload before domain validation.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Login email, validated structurally.
    pub email: String,
    /// Public handle, validated against the username rules.
    pub username: String,
    /// Given name, must be non-empty.
    pub first_name: String,
    /// Family name, must be non-empty.
    pub last_name: String,
}

/// Driving service for user accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl UserService {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<dyn UserRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { users, blobs }
    }

    /// Validate and persist a new account; taken email or username is a
    /// conflict.
    pub async fn register(&self, registration: Registration) -> Result<User, Error> {
        let email = Email::new(registration.email).map_err(map_validation_error)?;
        let username = Username::new(registration.username).map_err(map_validation_error)?;
        let user = User::register(
            email,
            username,
            registration.first_name,
            registration.last_name,
        )
        .map_err(map_validation_error)?;
        self.users.insert(&user).await.map_err(map_user_error)?;
        debug!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// List every registered profile.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_error)
    }

    /// Fetch a profile by id.
    pub async fn profile(&self, id: Uuid) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    /// Resolve the account behind a login email; unknown emails are
    /// rejected as unauthorized, not as not-found, to avoid leaking which
    /// addresses hold accounts.
    pub async fn authenticate(&self, email: &str) -> Result<User, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }

    /// Decode and store a data-URI avatar, then attach it to the user.
    /// Returns the stored reference.
    pub async fn set_avatar(&self, id: Uuid, data_uri: &str) -> Result<String, Error> {
        let decoded = decode_data_uri(data_uri)
            .map_err(|err| Error::validation_failed("avatar", err.to_string()))?;
        let reference = self
            .blobs
            .save(AVATAR_NAMESPACE, &decoded.extension, decoded.bytes)
            .await
            .map_err(|err| Error::service_unavailable(format!("blob store unavailable: {err}")))?;
        self.users
            .set_avatar(id, Some(reference.clone()))
            .await
            .map_err(map_user_error)?;
        debug!(user_id = %id, "avatar updated");
        Ok(reference)
    }

    /// Detach the user's avatar; removing an absent avatar is a no-op.
    pub async fn clear_avatar(&self, id: Uuid) -> Result<(), Error> {
        match self.users.set_avatar(id, None).await {
            Ok(()) => Ok(()),
            Err(UserPersistenceError::Missing) => Err(Error::not_found("user not found")),
            Err(err) => Err(map_user_error(err)),
        }
    }
}

fn map_validation_error(error: UserValidationError) -> Error {
    let field = match &error {
        UserValidationError::InvalidEmail => "email",
        UserValidationError::EmptyUsername
        | UserValidationError::UsernameTooLong { .. }
        | UserValidationError::UsernameInvalidCharacters => "username",
        UserValidationError::EmptyName { field } => *field,
    };
    Error::validation_failed(field, error.to_string())
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
