//! User identity data model.
//!
//! Authentication (password and token mechanics) lives outside this system;
//! the domain only carries the profile attributes that recipes, favorites,
//! and subscriptions reference.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was empty or whitespace-only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeds the storage limit.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Username contains characters outside the allowed set.
    #[error("username may only contain letters, digits, and . @ + - _")]
    UsernameInvalidCharacters,
    /// Email address failed the structural check.
    #[error("email must contain a local part and a domain")]
    InvalidEmail,
    /// A required name field was empty.
    #[error("{field} must not be empty")]
    EmptyName {
        /// Which name field was empty.
        field: &'static str,
    },
}

/// Maximum allowed length for a username, matching the storage column.
pub const USERNAME_MAX: usize = 150;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed
        // characters: word characters plus . @ + -
        #[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
        Regex::new(r"^[\w.@+-]+$").expect("username regex must compile")
    })
}

/// Login identity and display name, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if raw.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&raw) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the unique login identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    ///
    /// The check is structural only (`local@domain` with a non-empty dotted
    /// domain); deliverability is not this layer's concern.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        let Some((local, domain)) = raw.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(UserValidationError::InvalidEmail);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique login identity.
    pub email: Email,
    /// Unique public handle.
    pub username: Username,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Blob-store reference for the avatar image, when one was uploaded.
    pub avatar: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Validate name fields and assemble a new user with a fresh identifier.
    pub fn register(
        email: Email,
        username: Username,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let first_name = non_empty_name(first_name.into(), "first_name")?;
        let last_name = non_empty_name(last_name.into(), "last_name")?;
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            username,
            first_name,
            last_name,
            avatar: None,
            created_at: Utc::now(),
        })
    }
}

fn non_empty_name(value: String, field: &'static str) -> Result<String, UserValidationError> {
    if value.trim().is_empty() {
        return Err(UserValidationError::EmptyName { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("chef.anna")]
    #[case("anna@home")]
    #[case("a_n-n+a")]
    fn accepts_word_characters_and_allowed_punctuation(#[case] raw: &str) {
        assert!(Username::new(raw).is_ok());
    }

    #[rstest]
    #[case("anna smith", UserValidationError::UsernameInvalidCharacters)]
    #[case("anna!", UserValidationError::UsernameInvalidCharacters)]
    #[case("", UserValidationError::EmptyUsername)]
    fn rejects_forbidden_usernames(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw).expect_err("must reject"), expected);
    }

    #[rstest]
    fn rejects_overlong_usernames() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).expect_err("must reject"),
            UserValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    #[case("anna@example.com", true)]
    #[case("anna@localhost", false)]
    #[case("@example.com", false)]
    #[case("anna.example.com", false)]
    fn email_structural_check(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Email::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn register_rejects_blank_names() {
        let email = Email::new("anna@example.com").expect("valid email");
        let username = Username::new("anna").expect("valid username");
        let err = User::register(email, username, " ", "Smith").expect_err("must reject");
        assert_eq!(err, UserValidationError::EmptyName { field: "first_name" });
    }
}
