//! Handlers for signup, signin and session endpoints.
//!
//! Bodies reaching [`signup_handler`] and [`signin_handler`] have already been
//! checked and normalized by [`crate::api::middleware::validate`].

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::dto::auth::{AuthResult, SigninRequest, SignupRequest, SignupResponse, UserView};
use crate::api::middleware::auth::{CurrentUser, SessionToken};
use crate::error::AppError;
use crate::state::AppState;

/// Message sent back after a successful registration.
pub const SIGNUP_SUCCESS: &str = "Registration success. Please signin.";

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/auth/signup`
///
/// # Request Body
///
/// ```json
/// { "username": "John Doe", "email": "johndoe@admin.com", "password": "123456" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "successMessage": "Registration success. Please signin." }
/// ```
///
/// # Errors
///
/// Returns 400 if the body fails validation.
/// Returns 409 if the email is already registered.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    state
        .auth_service
        .signup(payload.username, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success_message: SIGNUP_SUCCESS.to_string(),
        }),
    ))
}

/// Signs in and issues a session token.
///
/// # Endpoint
///
/// `POST /api/auth/signin`
///
/// # Response
///
/// ```json
/// {
///   "token": "q2V0...",
///   "user": { "id": 1, "username": "John Doe", "email": "johndoe@admin.com", "role": 1 }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body fails validation or the credentials are wrong;
/// both carry the same payload shape.
pub async fn signin_handler(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<AuthResult>, AppError> {
    let signed_in = state
        .auth_service
        .signin(&payload.email, payload.password)
        .await?;

    Ok(Json(AuthResult {
        token: signed_in.token,
        user: signed_in.user.into(),
    }))
}

/// Returns the account behind the session token.
///
/// # Endpoint
///
/// `GET /api/auth/me` (Bearer token required)
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserView> {
    Json(user.into())
}

/// Revokes the session token used for this request.
///
/// # Endpoint
///
/// `POST /api/auth/signout` (Bearer token required)
///
/// # Response
///
/// `204 No Content`
pub async fn signout_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<StatusCode, AppError> {
    state.auth_service.signout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
