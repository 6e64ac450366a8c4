//! Request body validation for the auth endpoints.
//!
//! Each validator buffers the JSON body, runs its checks in a fixed order and
//! stops at the first violation:
//!
//! | Endpoint | Order |
//! |----------|-------|
//! | signup   | username not blank → email well-formed → password ≥ 6 chars |
//! | signin   | email well-formed → password ≥ 6 chars |
//!
//! A violation is answered with `400 Bad Request` and
//! `{"errorMessage": "<message>"}`; the handler never runs. Otherwise the
//! request is forwarded with a normalized body (trimmed username, normalized
//! email), so handlers can trust their input.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{
        HeaderValue,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::Response,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;

use crate::api::dto::auth::{SigninRequest, SignupRequest};
use crate::error::AppError;
use crate::utils::email_normalizer::normalize_email;
use crate::utils::field_validator::{MIN_PASSWORD_LENGTH, has_min_length, is_blank, is_valid_email};

pub const ALL_FIELDS_REQUIRED: &str = "All fields required";
pub const INVALID_EMAIL: &str = "Invalid Email";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 character long";
pub const INVALID_BODY: &str = "Invalid request body";

/// Largest body the validators will buffer.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Ordered field checks for a request body.
pub trait RequestRules: DeserializeOwned + Serialize + Send + Sized {
    /// Runs the checks in order and returns the normalized body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] carrying the first violation.
    fn check(self) -> Result<Self, AppError>;
}

fn violation(message: &'static str, field: &'static str) -> AppError {
    tracing::debug!(field, message, "Request rejected by validator");
    AppError::bad_request(message, json!({ "field": field }))
}

fn check_email(email: &str) -> Result<String, AppError> {
    if !is_valid_email(email) {
        return Err(violation(INVALID_EMAIL, "email"));
    }
    Ok(normalize_email(email))
}

fn check_password(password: &str) -> Result<(), AppError> {
    if !has_min_length(password, MIN_PASSWORD_LENGTH) {
        return Err(violation(PASSWORD_TOO_SHORT, "password"));
    }
    Ok(())
}

impl RequestRules for SignupRequest {
    fn check(self) -> Result<Self, AppError> {
        if is_blank(&self.username) {
            return Err(violation(ALL_FIELDS_REQUIRED, "username"));
        }
        let email = check_email(&self.email)?;
        check_password(&self.password)?;

        Ok(SignupRequest {
            username: self.username.trim().to_string(),
            email,
            password: self.password,
        })
    }
}

impl RequestRules for SigninRequest {
    fn check(self) -> Result<Self, AppError> {
        let email = check_email(&self.email)?;
        check_password(&self.password)?;

        Ok(SigninRequest {
            email,
            password: self.password,
        })
    }
}

/// Validates a JSON body of type `T` and forwards the normalized request.
///
/// # Errors
///
/// Returns `400 Bad Request` if the body cannot be read, is not valid JSON
/// for `T`, or violates one of `T`'s rules.
pub async fn validate_body<T: RequestRules>(req: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| AppError::bad_request(INVALID_BODY, json!({"reason": "Body unreadable or too large"})))?;

    let payload: T = serde_json::from_slice(&bytes).map_err(|e| {
        AppError::bad_request(INVALID_BODY, json!({ "reason": e.to_string() }))
    })?;

    let normalized = serde_json::to_vec(&payload.check()?)
        .map_err(|e| AppError::internal("Failed to encode request", json!({ "reason": e.to_string() })))?;

    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(normalized.len()));
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let req = Request::from_parts(parts, Body::from(normalized));

    Ok(next.run(req).await)
}

/// Validator in front of `POST /api/auth/signup`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
///
/// let app = Router::new()
///     .route("/signup", post(signup_handler))
///     .route_layer(middleware::from_fn(validate::signup_validator));
/// ```
pub async fn signup_validator(req: Request, next: Next) -> Result<Response, AppError> {
    validate_body::<SignupRequest>(req, next).await
}

/// Validator in front of `POST /api/auth/signin`.
pub async fn signin_validator(req: Request, next: Next) -> Result<Response, AppError> {
    validate_body::<SigninRequest>(req, next).await
}
