//! DTOs for the signup, signin and session endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::{Role, User};

/// Body of `POST /api/auth/signup`.
///
/// Missing fields deserialize as empty strings so that the validator reports
/// them with its own message instead of a JSON parse error.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /api/auth/signin`.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Response of a successful signup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success_message: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Response of a successful signin: an opaque token plus the account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResult {
    pub token: String,
    pub user: UserView,
}

/// Error payload as read by clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signup_request_missing_fields_default_to_empty() {
        let req: SignupRequest = serde_json::from_value(json!({"email": "a@b.com"})).unwrap();

        assert_eq!(req.username, "");
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.password, "");
    }

    #[test]
    fn test_debug_redacts_password() {
        let req = SigninRequest {
            email: "a@b.com".to_string(),
            password: "hunter22".to_string(),
        };

        let printed = format!("{req:?}");
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("hunter22"));
    }

    #[test]
    fn test_signup_response_wire_name() {
        let value = serde_json::to_value(SignupResponse {
            success_message: "ok".to_string(),
        })
        .unwrap();

        assert_eq!(value, json!({"successMessage": "ok"}));
    }

    #[test]
    fn test_auth_result_shape() {
        let value = serde_json::to_value(AuthResult {
            token: "tok".to_string(),
            user: UserView {
                id: 1,
                username: "John Doe".to_string(),
                email: "johndoe@admin.com".to_string(),
                role: Role::Admin,
            },
        })
        .unwrap();

        assert_eq!(value["token"], "tok");
        assert_eq!(value["user"]["role"], 1);
        assert_eq!(value["user"]["username"], "John Doe");
    }
}
