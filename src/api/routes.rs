//! API route configuration.

use crate::api::handlers::{
    admin_dashboard_handler, me_handler, signin_handler, signout_handler, signup_handler,
    user_dashboard_handler,
};
use crate::api::middleware::{auth, validate};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Credential endpoints, each behind its body validator.
///
/// # Endpoints
///
/// - `POST /auth/signup` - Register an account
/// - `POST /auth/signin` - Exchange credentials for a session token
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/signup",
            post(signup_handler).route_layer(middleware::from_fn(validate::signup_validator)),
        )
        .route(
            "/auth/signin",
            post(signin_handler).route_layer(middleware::from_fn(validate::signin_validator)),
        )
}

/// Endpoints for any signed-in account, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET  /auth/me`         - Account behind the token
/// - `POST /auth/signout`    - Revoke the token
/// - `GET  /user/dashboard`  - User dashboard
pub fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/auth/signout", post(signout_handler))
        .route("/user/dashboard", get(user_dashboard_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}

/// Endpoints restricted to administrators.
///
/// # Endpoints
///
/// - `GET /admin/dashboard` - Admin dashboard with every account
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(admin_dashboard_handler))
        .route_layer(middleware::from_fn(auth::require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
