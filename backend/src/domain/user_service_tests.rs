//! Tests for the user account service.

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockBlobStore, MockUserRepository};
use crate::domain::ErrorCode;

const PNG_URI: &str = "data:image/png;base64,aGVsbG8=";

fn registration() -> Registration {
    Registration {
        email: "chef@example.com".into(),
        username: "chef".into(),
        first_name: "Julia".into(),
        last_name: "Child".into(),
    }
}

fn service(users: MockUserRepository, blobs: MockBlobStore) -> UserService {
    UserService::new(Arc::new(users), Arc::new(blobs))
}

#[tokio::test]
async fn register_persists_a_validated_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(|user: &User| user.username.as_str() == "chef" && user.avatar.is_none())
        .return_once(|_| Ok(()));

    let user = service(users, MockBlobStore::new())
        .register(registration())
        .await
        .expect("register succeeds");
    assert_eq!(user.email.as_str(), "chef@example.com");
}

#[tokio::test]
async fn register_rejects_a_malformed_email_before_any_write() {
    let mut users = MockUserRepository::new();
    users.expect_insert().times(0);

    let mut payload = registration();
    payload.email = "not-an-email".into();
    let err = service(users, MockBlobStore::new())
        .register(payload)
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some("email"));
}

#[tokio::test]
async fn register_surfaces_a_taken_email_as_a_conflict() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate("email taken")));

    let err = service(users, MockBlobStore::new())
        .register(registration())
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn list_returns_every_profile_in_repository_order() {
    let mut users = MockUserRepository::new();
    users.expect_list().return_once(|| {
        let anna = User::register(
            Email::new("anna@example.com").expect("valid email"),
            Username::new("anna").expect("valid username"),
            "Anna",
            "Smith",
        )
        .expect("valid user");
        let boris = User::register(
            Email::new("boris@example.com").expect("valid email"),
            Username::new("boris").expect("valid username"),
            "Boris",
            "Smith",
        )
        .expect("valid user");
        Ok(vec![anna, boris])
    });

    let profiles = service(users, MockBlobStore::new())
        .list()
        .await
        .expect("list returned");
    let usernames: Vec<&str> = profiles
        .iter()
        .map(|user| user.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["anna", "boris"]);
}

#[tokio::test]
async fn authenticate_rejects_unknown_emails_as_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));

    let err = service(users, MockBlobStore::new())
        .authenticate("ghost@example.com")
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn set_avatar_stores_the_image_and_attaches_the_reference() {
    let user_id = Uuid::new_v4();
    let mut blobs = MockBlobStore::new();
    blobs
        .expect_save()
        .withf(|namespace, extension, _| namespace == "avatars" && extension == "png")
        .return_once(|_, _, _| Ok("avatars/abc.png".into()));
    let mut users = MockUserRepository::new();
    users
        .expect_set_avatar()
        .with(eq(user_id), eq(Some(String::from("avatars/abc.png"))))
        .return_once(|_, _| Ok(()));

    let reference = service(users, blobs)
        .set_avatar(user_id, PNG_URI)
        .await
        .expect("avatar stored");
    assert_eq!(reference, "avatars/abc.png");
}

#[tokio::test]
async fn set_avatar_rejects_a_payload_that_is_not_a_data_uri() {
    let mut users = MockUserRepository::new();
    users.expect_set_avatar().times(0);
    let mut blobs = MockBlobStore::new();
    blobs.expect_save().times(0);

    let err = service(users, blobs)
        .set_avatar(Uuid::new_v4(), "https://example.com/cat.png")
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn clear_avatar_of_an_unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_set_avatar()
        .with(eq(Uuid::nil()), eq(None))
        .return_once(|_, _| Err(UserPersistenceError::Missing));

    let err = service(users, MockBlobStore::new())
        .clear_avatar(Uuid::nil())
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
