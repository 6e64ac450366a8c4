mod common;

use auth_portal::domain::entities::Role;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;

async fn signed_in(pool: &PgPool, role: Role) -> (TestServer, String) {
    let email = format!("{role}@example.com");
    common::create_test_user(pool, &format!("{role} account"), &email, role).await;

    let server = TestServer::new(common::create_test_app(common::create_test_state(
        pool.clone(),
    )))
    .unwrap();

    let response = server
        .post("/api/auth/signin")
        .json(&json!({"email": email, "password": common::TEST_PASSWORD}))
        .await;
    response.assert_status_ok();

    let token = response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    (server, token)
}

#[sqlx::test]
async fn test_user_dashboard(pool: PgPool) {
    let (server, token) = signed_in(&pool, Role::User).await;

    let response = server
        .get("/api/user/dashboard")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["greeting"], "Welcome, user account");
    assert_eq!(json["user"]["role"], 0);
}

#[sqlx::test]
async fn test_user_dashboard_requires_session(pool: PgPool) {
    let server = TestServer::new(common::create_test_app(common::create_test_state(pool))).unwrap();

    server
        .get("/api/user/dashboard")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_admin_dashboard_lists_accounts(pool: PgPool) {
    common::create_test_user(&pool, "first", "first@example.com", Role::User).await;
    let (server, token) = signed_in(&pool, Role::Admin).await;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["greeting"], "Welcome, admin account");
    assert_eq!(json["total"], 2);

    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "first@example.com");
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[sqlx::test]
async fn test_admin_dashboard_forbidden_for_users(pool: PgPool) {
    let (server, token) = signed_in(&pool, Role::User).await;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(&token)
        .await;

    response.assert_status_forbidden();
    assert_eq!(response.json::<Value>()["errorMessage"], "Admin access required");
}

#[sqlx::test]
async fn test_admin_dashboard_requires_session(pool: PgPool) {
    let server = TestServer::new(common::create_test_app(common::create_test_state(pool))).unwrap();

    server
        .get("/api/admin/dashboard")
        .await
        .assert_status_unauthorized();
}
