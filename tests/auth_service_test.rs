//! Registration, login, token resolution and password changes.

mod common;

use common::{app, no_lookup, noon, CPFS, PASSWORD};
use ponto_api::domain::UserRole;
use ponto_api::errors::AppError;
use ponto_api::infra::{Persistence, UnitOfWork};
use ponto_api::services::{PasswordChange, Registration, ServiceContainer};

#[tokio::test]
async fn registration_creates_an_admin() {
    let app = app(no_lookup(), noon()).await;
    let user = app
        .services
        .auth()
        .register(Registration {
            name: "Maria".into(),
            email: "maria@empresa.com.br".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::Admin);
    assert!(user.admin_id.is_none());
    assert_ne!(user.password_hash, PASSWORD);
}

#[tokio::test]
async fn duplicate_registration_is_a_field_error() {
    let app = app(no_lookup(), noon()).await;
    app.admin("Maria", "maria@empresa.com.br").await;

    let err = app
        .services
        .auth()
        .register(Registration {
            name: "Outra".into(),
            email: "maria@empresa.com.br".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();

    match err {
        AppError::Validation(fields) => assert!(fields.contains_key("email")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn login_issues_a_token_that_resolves_to_the_user() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let auth = app.services.auth();

    let token = auth
        .login("maria@empresa.com.br".into(), PASSWORD.into())
        .await
        .unwrap();
    assert_eq!(token.token_type, "Bearer");

    let principal = auth.authenticate(&token.access_token).await.unwrap();
    assert_eq!(principal, admin);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = app(no_lookup(), noon()).await;
    app.admin("Maria", "maria@empresa.com.br").await;
    let auth = app.services.auth();

    let wrong = auth
        .login("maria@empresa.com.br".into(), "errada".into())
        .await
        .unwrap_err();
    let unknown = auth
        .login("ninguem@empresa.com.br".into(), PASSWORD.into())
        .await
        .unwrap_err();

    assert!(matches!(wrong, AppError::InvalidCredentials));
    assert!(matches!(unknown, AppError::InvalidCredentials));
}

#[tokio::test]
async fn tokens_of_deleted_users_are_rejected() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let ana = app.employee(&admin, "Ana", CPFS[0]).await;
    let auth = app.services.auth();

    let token = auth
        .login("ana@empresa.com.br".into(), PASSWORD.into())
        .await
        .unwrap();
    app.services.employees().delete(&admin, ana.id).await.unwrap();

    let err = auth.authenticate(&token.access_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let err = auth.authenticate("not-a-jwt").await.unwrap_err();
    assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_current_password_keeps_the_stored_hash() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let uow = Persistence::new(app.db.clone());
    let before = uow.users().find_by_id(admin.id).await.unwrap().unwrap();

    let err = app
        .services
        .auth()
        .change_password(
            &admin,
            PasswordChange {
                current_password: "errada".into(),
                new_password: "nova-senha".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let after = uow.users().find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(before.password_hash, after.password_hash);
}

#[tokio::test]
async fn reused_password_is_checked_after_the_current_one() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let uow = Persistence::new(app.db.clone());
    let before = uow.users().find_by_id(admin.id).await.unwrap().unwrap();
    let auth = app.services.auth();

    // A wrong current password wins even when it equals the new one
    let err = auth
        .change_password(
            &admin,
            PasswordChange {
                current_password: "outra-senha".into(),
                new_password: "outra-senha".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = auth
        .change_password(
            &admin,
            PasswordChange {
                current_password: PASSWORD.into(),
                new_password: PASSWORD.into(),
            },
        )
        .await
        .unwrap_err();
    match err {
        AppError::Validation(fields) => assert!(fields.contains_key("new_password")),
        other => panic!("expected validation error, got {:?}", other),
    }

    let after = uow.users().find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(before.password_hash, after.password_hash);
}

#[tokio::test]
async fn changed_password_replaces_the_old_one() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let auth = app.services.auth();

    auth.change_password(
        &admin,
        PasswordChange {
            current_password: PASSWORD.into(),
            new_password: "nova-senha".into(),
        },
    )
    .await
    .unwrap();

    assert!(auth
        .login("maria@empresa.com.br".into(), "nova-senha".into())
        .await
        .is_ok());
    assert!(auth
        .login("maria@empresa.com.br".into(), PASSWORD.into())
        .await
        .is_err());
}

#[tokio::test]
async fn short_new_password_is_a_field_error() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;

    let err = app
        .services
        .auth()
        .change_password(
            &admin,
            PasswordChange {
                current_password: PASSWORD.into(),
                new_password: "123".into(),
            },
        )
        .await
        .unwrap_err();

    match err {
        AppError::Validation(fields) => assert!(fields.contains_key("new_password")),
        other => panic!("expected validation error, got {:?}", other),
    }
}
