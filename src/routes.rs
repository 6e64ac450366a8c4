//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                - Database health check (public)
//! - `POST /api/auth/signup`       - Registration (validated, rate limited)
//! - `POST /api/auth/signin`       - Signin (validated, rate limited)
//! - `GET  /api/auth/me`           - Current account (Bearer token)
//! - `POST /api/auth/signout`      - Revoke session (Bearer token)
//! - `GET  /api/user/dashboard`    - User dashboard (Bearer token)
//! - `GET  /api/admin/dashboard`   - Admin dashboard (Bearer token, admin role)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, optional
//! - **CORS** - Single allowed origin, optional
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Switches for the optional middleware.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Per-IP rate limiting. Requires the service to be served with connect info.
    pub rate_limit: bool,
    /// Origin allowed to call the API from a browser.
    pub cors_allowed_origin: Option<String>,
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `options` - optional middleware switches
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    let mut credentials = api::routes::credential_routes();
    let mut sessions = api::routes::session_routes(state.clone())
        .merge(api::routes::admin_routes(state.clone()));

    if options.rate_limit {
        credentials = credentials.layer(rate_limit::secure_layer());
        sessions = sessions.layer(rate_limit::layer());
    }

    let api_router = Router::new().merge(credentials).merge(sessions);

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state);

    if let Some(origin) = &options.cors_allowed_origin {
        match HeaderValue::from_str(origin) {
            Ok(origin) => {
                router = router.layer(
                    CorsLayer::new()
                        .allow_origin(origin)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                );
            }
            Err(_) => ::tracing::warn!(%origin, "Ignoring invalid CORS origin"),
        }
    }

    let router = router.layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
