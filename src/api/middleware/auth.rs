//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// Account resolved from the session token, available to handlers as
/// `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Raw session token of the request, available as `Extension<SessionToken>`.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Authenticates requests using the session token from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve its HMAC hash to an active session
/// 3. Insert [`CurrentUser`] and [`SessionToken`] into request extensions
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Session is unknown, expired or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/auth/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));
    req.extensions_mut().insert(SessionToken(token));

    Ok(next.run(req).await)
}

/// Lets only administrators through. Must run after [`layer`].
///
/// # Errors
///
/// Returns `401 Unauthorized` if no [`CurrentUser`] is present.
/// Returns `403 Forbidden` if the account is not an administrator.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let Some(CurrentUser(user)) = req.extensions().get::<CurrentUser>() else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Not signed in"}),
        ));
    };

    if !user.role.is_admin() {
        tracing::debug!(user_id = user.id, "Admin route refused");
        return Err(AppError::forbidden(
            "Admin access required",
            json!({ "role": user.role.to_string() }),
        ));
    }

    Ok(next.run(req).await)
}
