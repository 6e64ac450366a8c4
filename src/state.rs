//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, UserService};
use crate::infrastructure::persistence::{PgSessionRepository, PgUserRepository};

pub type PgAuthService = AuthService<PgUserRepository, PgSessionRepository>;
pub type PgUserService = UserService<PgUserRepository>;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<PgAuthService>,
    pub user_service: Arc<PgUserService>,
    pub pool: Arc<PgPool>,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    pub fn new(pool: Arc<PgPool>, signing_secret: String, session_ttl: chrono::Duration) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let sessions = Arc::new(PgSessionRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                sessions,
                signing_secret,
                session_ttl,
            )),
            user_service: Arc::new(UserService::new(users)),
            pool,
        }
    }
}
