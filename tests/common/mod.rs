#![allow(dead_code)]

use auth_portal::api::routes::{admin_routes, credential_routes, session_routes};
use auth_portal::application::services::auth_service::hash_password;
use auth_portal::domain::entities::Role;
use auth_portal::state::AppState;
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "secret1";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        TEST_SIGNING_SECRET.to_string(),
        chrono::Duration::hours(1),
    )
}

/// The `/api` routes with their validation and auth layers.
pub fn create_test_app(state: AppState) -> Router {
    let api = credential_routes()
        .merge(session_routes(state.clone()))
        .merge(admin_routes(state.clone()));

    Router::new().nest("/api", api).with_state(state)
}

/// Inserts an account whose password is [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str, email: &str, role: Role) -> i64 {
    let password_hash = hash_password(TEST_PASSWORD).unwrap();

    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role.code())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_sessions(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
