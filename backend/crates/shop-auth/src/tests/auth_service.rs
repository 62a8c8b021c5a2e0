use crate::tests::{InMemoryCredentialStore, hasher, token_service};
use crate::{AuthError, AuthService, ProfileUpdate};

use std::sync::Arc;

use googletest::prelude::*;

fn service() -> (AuthService<InMemoryCredentialStore>, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::default());
    let service =
        AuthService::new(store.clone(), hasher(), Arc::new(token_service()), 6).unwrap();
    (service, store)
}

#[tokio::test]
async fn given_new_email_when_registered_then_token_identifies_new_user() {
    // Given
    let (service, _) = service();

    // When
    let session = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    // Then
    let claims = service.token_service().verify(&session.token).unwrap();
    assert_that!(claims.subject_id().unwrap(), eq(session.user.id));
    assert_that!(claims.email, eq("a@x.com"));
    assert_that!(session.user.name, eq("Ann"));
}

#[tokio::test]
async fn given_registered_user_when_logging_in_then_same_identity() {
    // Given
    let (service, _) = service();
    let registered = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    // When
    let session = service.login("a@x.com", "secret1").await.unwrap();

    // Then
    assert_that!(session.user.id, eq(registered.user.id));
    let claims = service.token_service().verify(&session.token).unwrap();
    assert_that!(claims.subject_id().unwrap(), eq(registered.user.id));
}

#[tokio::test]
async fn given_taken_email_when_registering_then_duplicate_and_store_unchanged() {
    // Given
    let (service, store) = service();
    service.register("a@x.com", "Ann", "secret1").await.unwrap();

    // When
    let result = service.register("a@x.com", "Other", "secret2").await;

    // Then
    assert!(matches!(result, Err(AuthError::DuplicateEmail { .. })));
    assert_that!(store.len(), eq(1));
    assert!(service.login("a@x.com", "secret1").await.is_ok());
}

#[tokio::test]
async fn given_email_differing_in_case_when_registering_then_distinct_identity() {
    let (service, store) = service();
    let first = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    let second = service.register("A@X.COM", "Ann", "secret1").await.unwrap();

    assert_that!(second.user.id, not(eq(first.user.id)));
    assert_that!(store.len(), eq(2));
}

#[tokio::test]
async fn given_unknown_email_or_wrong_password_when_logging_in_then_indistinguishable() {
    // Given
    let (service, _) = service();
    service.register("a@x.com", "Ann", "secret1").await.unwrap();

    // When
    let unknown = service.login("nobody@x.com", "secret1").await.unwrap_err();
    let wrong = service.login("a@x.com", "wrong-password").await.unwrap_err();

    // Then
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert_that!(unknown.to_string(), eq(&wrong.to_string()));
    assert_that!(unknown.error_code(), eq(wrong.error_code()));
}

#[tokio::test]
async fn given_email_in_other_case_when_logging_in_then_invalid_credentials() {
    let (service, _) = service();
    service.register("a@x.com", "Ann", "secret1").await.unwrap();

    let result = service.login("A@x.com", "secret1").await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn given_invalid_fields_when_registering_then_invalid_input_names_field() {
    let (service, store) = service();

    let cases = [
        ("", "Ann", "secret1", "email"),
        ("not-an-email", "Ann", "secret1", "email"),
        ("a@x", "Ann", "secret1", "email"),
        ("a b@x.com", "Ann", "secret1", "email"),
        ("a@x.com", "   ", "secret1", "name"),
        ("a@x.com", "Ann", "short", "password"),
        ("a@x.com", "Ann", "", "password"),
    ];

    for (email, name, password, expected_field) in cases {
        let result = service.register(email, name, password).await;

        match result {
            Err(AuthError::InvalidInput { field, .. }) => {
                assert_that!(field.as_deref(), some(eq(expected_field)));
            }
            other => panic!("expected InvalidInput for {email:?}, got {other:?}"),
        }
    }

    assert_that!(store.len(), eq(0));
}

#[tokio::test]
async fn given_stored_hash_when_registered_then_plaintext_not_stored() {
    let (service, store) = service();
    let session = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    let identity = shop_core::CredentialStore::find_by_id(store.as_ref(), session.user.id)
        .await
        .unwrap()
        .unwrap();

    assert_that!(identity.password_hash, not(contains_substring("secret1")));
    assert!(hasher().verify("secret1", &identity.password_hash));
}

#[tokio::test]
async fn given_registered_user_when_profile_loaded_then_returns_profile() {
    let (service, _) = service();
    let session = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    let profile = service.profile(session.user.id).await.unwrap();

    assert_that!(profile.email, eq("a@x.com"));
    assert_that!(profile.name, eq("Ann"));
}

#[tokio::test]
async fn given_unknown_id_when_profile_loaded_then_not_found() {
    let (service, _) = service();

    let result = service.profile(999).await;

    assert!(matches!(result, Err(AuthError::NotFound { id: 999, .. })));
}

#[tokio::test]
async fn given_new_password_when_profile_updated_then_login_uses_new_password() {
    // Given
    let (service, _) = service();
    let session = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    // When
    let profile = service
        .update_profile(
            session.user.id,
            ProfileUpdate {
                name: Some("Annie".to_string()),
                password: Some("secret2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Then
    assert_that!(profile.name, eq("Annie"));
    assert!(matches!(
        service.login("a@x.com", "secret1").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(service.login("a@x.com", "secret2").await.is_ok());
}

#[tokio::test]
async fn given_email_of_other_user_when_profile_updated_then_duplicate() {
    let (service, _) = service();
    service.register("a@x.com", "Ann", "secret1").await.unwrap();
    let bob = service.register("b@x.com", "Bob", "secret1").await.unwrap();

    let result = service
        .update_profile(
            bob.user.id,
            ProfileUpdate {
                email: Some("a@x.com".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AuthError::DuplicateEmail { .. })));
}

#[tokio::test]
async fn given_empty_update_when_profile_updated_then_invalid_input() {
    let (service, _) = service();
    let session = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    let result = service
        .update_profile(session.user.id, ProfileUpdate::default())
        .await;

    assert!(matches!(result, Err(AuthError::InvalidInput { .. })));
}

#[tokio::test]
async fn given_deleted_account_when_logging_in_then_invalid_credentials() {
    // Given
    let (service, store) = service();
    let session = service.register("a@x.com", "Ann", "secret1").await.unwrap();

    // When
    service.delete_account(session.user.id).await.unwrap();

    // Then
    assert_that!(store.len(), eq(0));
    assert!(matches!(
        service.login("a@x.com", "secret1").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        service.delete_account(session.user.id).await,
        Err(AuthError::NotFound { .. })
    ));
}
