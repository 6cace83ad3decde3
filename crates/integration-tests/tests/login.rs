//! Login, logout and session lifetime through the full router.
//!
//! Requires a `PostgreSQL` database at `HELPDESK_TEST_DATABASE_URL`.
//! Run with: cargo test -p helpdesk-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use helpdesk_core::Role;
use helpdesk_integration_tests::{
    PASSWORD, app, body_text, connect, create_ticket, create_user, get, location, login,
    login_cookie, session_cookie,
};
use helpdesk_web::db::UserRepository;

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_login_success_establishes_session() {
    let pool = connect().await;
    let app = app(pool.clone());
    let agent = create_user(&pool, "Agnes", Role::Agent).await;

    let cookie = login_cookie(&app, &agent).await;

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Welcome, Agnes!"));
    assert!(body.contains("AGENT"));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_wrong_password_matches_unknown_email() {
    let pool = connect().await;
    let app = app(pool.clone());
    let user = create_user(&pool, "Uma", Role::User).await;
    let email = user.email.as_str();
    let unknown = format!("nobody-{email}");

    let wrong_password = login(&app, email, "not the password").await;
    let unknown_email = login(&app, &unknown, PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::OK);
    assert_eq!(unknown_email.status(), StatusCode::OK);
    assert!(session_cookie(&wrong_password).is_none());
    assert!(session_cookie(&unknown_email).is_none());

    // Identical apart from the echoed email
    let a = body_text(wrong_password).await.replace(email, "EMAIL");
    let b = body_text(unknown_email).await.replace(&unknown, "EMAIL");
    assert_eq!(a, b);
    assert!(a.contains("Invalid email or password."));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_unrecognised_role_cannot_log_in() {
    let pool = connect().await;
    let app = app(pool.clone());
    let user = create_user(&pool, "Odd", Role::User).await;
    UserRepository::new(&pool)
        .set_role(user.id, "user")
        .await
        .unwrap();

    let response = login(&app, user.email.as_str(), PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response).await.contains("Invalid email or password."));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_logout_then_tickets_redirects() {
    let pool = connect().await;
    let app = app(pool.clone());
    let user = create_user(&pool, "Uma", Role::User).await;
    let cookie = login_cookie(&app, &user).await;

    assert_eq!(
        get(&app, "/tickets", Some(&cookie)).await.status(),
        StatusCode::OK
    );

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(location(&response), "/login");

    let response = get(&app, "/tickets", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_role_change_applies_at_next_login() {
    let pool = connect().await;
    let app = app(pool.clone());
    let user = create_user(&pool, "Pat", Role::User).await;
    let stranger = create_user(&pool, "Stranger", Role::User).await;
    let (_, foreign_title) = create_ticket(&pool, stranger.id, None).await;

    let cookie = login_cookie(&app, &user).await;
    UserRepository::new(&pool)
        .set_role(user.id, Role::Admin.as_str())
        .await
        .unwrap();

    // The session still carries the role captured at login
    let body = body_text(get(&app, "/tickets", Some(&cookie)).await).await;
    assert!(!body.contains(&foreign_title));
    assert!(body.contains("(USER)"));

    let cookie = login_cookie(&app, &user).await;
    let body = body_text(get(&app, "/tickets", Some(&cookie)).await).await;
    assert!(body.contains(&foreign_title));
    assert!(body.contains("(ADMIN)"));
}
