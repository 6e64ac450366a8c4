//! HTTP client for the auth endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::dto::auth::{
    AuthResult, ErrorPayload, SigninRequest, SignupRequest, SignupResponse, UserView,
};
use crate::api::dto::dashboard::{AdminDashboardResponse, UserDashboardResponse};

/// Shown in place of any failure that did not come with a server message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Per-request timeout of [`HttpAuthClient`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with an error status and an `errorMessage`.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The request never got a usable answer.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Text to show to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, ApiError>;

    async fn signin(&self, request: SigninRequest) -> Result<AuthResult, ApiError>;

    async fn signout(&self, token: &str) -> Result<(), ApiError>;

    async fn me(&self, token: &str) -> Result<UserView, ApiError>;

    async fn user_dashboard(&self, token: &str) -> Result<UserDashboardResponse, ApiError>;

    async fn admin_dashboard(&self, token: &str) -> Result<AdminDashboardResponse, ApiError>;
}

/// [`AuthApi`] over HTTP. No retries.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthClient {
    /// Creates a client for the service at `base_url`, e.g. `http://localhost:5000`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/signup"))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }

    async fn signin(&self, request: SigninRequest) -> Result<AuthResult, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/signin"))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }

    async fn signout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/signout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(transport)?;
        Err(parse_error_body(status.as_u16(), &body))
    }

    async fn me(&self, token: &str) -> Result<UserView, ApiError> {
        self.get_json("/api/auth/me", token).await
    }

    async fn user_dashboard(&self, token: &str) -> Result<UserDashboardResponse, ApiError> {
        self.get_json("/api/user/dashboard", token).await
    }

    async fn admin_dashboard(&self, token: &str) -> Result<AdminDashboardResponse, ApiError> {
        self.get_json("/api/admin/dashboard", token).await
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport)?;
    parse_response(status, &body)
}

/// Turns a status and body into either the expected payload or an [`ApiError`].
pub fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        serde_json::from_str(body)
            .map_err(|e| ApiError::Transport(format!("unexpected response: {e}")))
    } else {
        Err(parse_error_body(status, body))
    }
}

/// Reads the `errorMessage` of an error response.
///
/// A body without one is treated as a transport failure.
pub fn parse_error_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => ApiError::Rejected {
            status,
            message: payload.error_message,
        },
        Err(_) => ApiError::Transport(format!("HTTP {status}: {body}")),
    }
}
