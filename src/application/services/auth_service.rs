//! Account registration, signin and session token service.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewSession, NewUser, Role, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::token_generator::generate_token;

type HmacSha256 = Hmac<Sha256>;

/// Message returned for an unknown email or a wrong password.
///
/// Uses the same status and payload shape as input validation errors, so a
/// caller cannot tell which of the two failed.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Message returned when the email is already registered.
pub const EMAIL_TAKEN: &str = "Email already exists";

/// Salt length in bytes before base64 encoding.
const SALT_LENGTH_BYTES: usize = 16;

/// Result of a successful signin.
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// Raw session token. Shown to the client once, stored only as a hash.
    pub token: String,
    pub user: User,
}

/// Service for registering accounts and managing signed-in sessions.
///
/// Passwords are hashed with argon2. Session tokens are random, handed out
/// once, and stored as HMAC-SHA256 hashes keyed by `signing_secret`, so read
/// access to the database is not enough to impersonate a user.
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    users: Arc<U>,
    sessions: Arc<S>,
    signing_secret: String,
    session_ttl: Duration,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - account repository
    /// - `sessions` - session repository
    /// - `signing_secret` - HMAC key; must stay stable across restarts
    /// - `session_ttl` - lifetime of a session issued by [`Self::signin`]
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        signing_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            signing_secret,
            session_ttl,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Registers a new account with the [`Role::User`] role.
    ///
    /// Expects input that already passed the signup validator: trimmed
    /// username, normalized email, password of sufficient length.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn signup(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User, AppError> {
        if self.users.find_by_email(&email).await?.is_some() {
            tracing::debug!(%email, "Signup rejected: email already registered");
            return Err(AppError::conflict(EMAIL_TAKEN, json!({ "field": "email" })));
        }

        let password_hash = hash_password_blocking(password).await?;

        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        metrics::counter!("auth_signup_total").increment(1);
        tracing::info!(user_id = user.id, "Account registered");

        Ok(user)
    }

    /// Verifies credentials and opens a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with [`INVALID_CREDENTIALS`] if the
    /// email is unknown or the password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn signin(&self, email: &str, password: String) -> Result<SignedIn, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            metrics::counter!("auth_signin_total", "outcome" => "rejected").increment(1);
            tracing::debug!(%email, "Signin rejected: unknown email");
            return Err(invalid_credentials());
        };

        if !verify_password_blocking(password, user.password_hash.clone()).await? {
            metrics::counter!("auth_signin_total", "outcome" => "rejected").increment(1);
            tracing::debug!(user_id = user.id, "Signin rejected: wrong password");
            return Err(invalid_credentials());
        }

        let token = generate_token();

        self.sessions
            .create(NewSession {
                user_id: user.id,
                token_hash: self.hash_token(&token),
                expires_at: Utc::now() + self.session_ttl,
            })
            .await?;

        metrics::counter!("auth_signin_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = user.id, role = %user.role, "Signed in");

        Ok(SignedIn { token, user })
    }

    /// Resolves a raw session token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = self.hash_token(token);

        self.sessions
            .find_user_by_token(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid, expired or revoked token"}),
                )
            })
    }

    /// Revokes the session behind a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn signout(&self, token: &str) -> Result<(), AppError> {
        let revoked = self.sessions.revoke(&self.hash_token(token)).await?;

        if revoked {
            tracing::info!("Session revoked");
        }

        Ok(())
    }

    /// Removes expired sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let removed = self.sessions.purge_expired().await?;
        tracing::info!(removed, "Expired sessions purged");
        Ok(removed)
    }
}

fn invalid_credentials() -> AppError {
    AppError::bad_request(INVALID_CREDENTIALS, json!({}))
}

/// Hashes a password into a PHC-format argon2 string.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if salt generation or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; SALT_LENGTH_BYTES];
    getrandom::fill(&mut salt_bytes)
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

/// Checks a password against a stored PHC string.
///
/// An unparseable stored hash never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        tracing::error!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Runs [`hash_password`] off the async executor.
async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))?
}

/// Runs [`verify_password`] off the async executor.
async fn verify_password_blocking(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal("Failed to verify password", json!({ "reason": e.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Session;
    use crate::domain::repositories::{MockSessionRepository, MockUserRepository};

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn service(
        users: MockUserRepository,
        sessions: MockSessionRepository,
    ) -> AuthService<MockUserRepository, MockSessionRepository> {
        AuthService::new(
            Arc::new(users),
            Arc::new(sessions),
            test_secret(),
            Duration::hours(24),
        )
    }

    fn test_user(id: i64, password: &str, role: Role) -> User {
        User::new(
            id,
            "John Doe".to_string(),
            "johndoe@admin.com".to_string(),
            hash_password(password).unwrap(),
            role,
            Utc::now(),
        )
    }

    fn stored_session(new_session: &NewSession) -> Session {
        Session {
            id: 1,
            user_id: new_session.user_id,
            token_hash: new_session.token_hash.clone(),
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
            revoked_at: None,
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("123456").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("123456", &hash));
        assert!(!verify_password("1234567", &hash));
    }

    #[test]
    fn test_hash_password_uses_fresh_salt() {
        assert_ne!(hash_password("123456").unwrap(), hash_password("123456").unwrap());
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(!verify_password("123456", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .withf(|email| email == "jane@example.com")
            .times(1)
            .returning(|_| Ok(None));

        users
            .expect_create()
            .withf(|new_user| {
                new_user.role == Role::User
                    && new_user.username == "Jane"
                    && verify_password("123456", &new_user.password_hash)
            })
            .times(1)
            .returning(|new_user| {
                Ok(User::new(
                    3,
                    new_user.username,
                    new_user.email,
                    new_user.password_hash,
                    new_user.role,
                    Utc::now(),
                ))
            });

        let svc = service(users, MockSessionRepository::new());

        let user = svc
            .signup(
                "Jane".to_string(),
                "jane@example.com".to_string(),
                "123456".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(test_user(1, "123456", Role::User))));

        users.expect_create().times(0);

        let svc = service(users, MockSessionRepository::new());

        let result = svc
            .signup(
                "John".to_string(),
                "johndoe@admin.com".to_string(),
                "123456".to_string(),
            )
            .await;

        match result.unwrap_err() {
            AppError::Conflict { message, .. } => assert_eq!(message, EMAIL_TAKEN),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signin_success_issues_hashed_token() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        let user = test_user(1, "123456", Role::Admin);
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        sessions
            .expect_create()
            .withf(|s| s.user_id == 1 && s.token_hash.len() == 64 && s.expires_at > Utc::now())
            .times(1)
            .returning(|s| Ok(stored_session(&s)));

        let svc = service(users, sessions);

        let signed_in = svc
            .signin("johndoe@admin.com", "123456".to_string())
            .await
            .unwrap();

        assert_eq!(signed_in.user.role, Role::Admin);
        assert_eq!(signed_in.token.len(), 43);
        assert_ne!(svc.hash_token(&signed_in.token), signed_in.token);
    }

    #[tokio::test]
    async fn test_signin_unknown_email() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        sessions.expect_create().times(0);

        let svc = service(users, sessions);

        let err = svc
            .signin("nobody@example.com", "123456".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { ref message, .. } if message == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_signin_wrong_password_looks_like_unknown_email() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        let user = test_user(1, "123456", Role::User);
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        sessions.expect_create().times(0);

        let svc = service(users, sessions);

        let err = svc
            .signin("johndoe@admin.com", "654321".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { ref message, .. } if message == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut sessions = MockSessionRepository::new();

        let svc_for_hash = service(MockUserRepository::new(), MockSessionRepository::new());
        let expected_hash = svc_for_hash.hash_token("valid-token");

        let user = test_user(9, "123456", Role::User);
        sessions
            .expect_find_user_by_token()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(MockUserRepository::new(), sessions);

        let user = svc.authenticate("valid-token").await.unwrap();
        assert_eq!(user.id, 9);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut sessions = MockSessionRepository::new();

        sessions
            .expect_find_user_by_token()
            .times(1)
            .returning(|_| Ok(None));

        let svc = service(MockUserRepository::new(), sessions);

        let result = svc.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_signout_revokes_hash() {
        let mut sessions = MockSessionRepository::new();

        let expected_hash =
            service(MockUserRepository::new(), MockSessionRepository::new()).hash_token("tok");

        sessions
            .expect_revoke()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(true));

        let svc = service(MockUserRepository::new(), sessions);

        assert!(svc.signout("tok").await.is_ok());
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionRepository::new()),
            "secret-a".to_string(),
            Duration::hours(1),
        );
        let svc2 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionRepository::new()),
            "secret-b".to_string(),
            Duration::hours(1),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
        assert_eq!(svc1.hash_token("token"), svc1.hash_token("token"));
        assert_eq!(svc1.hash_token("token").len(), 64);
    }
}
