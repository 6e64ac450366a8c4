//! Repository trait for signed-in sessions.

use crate::domain::entities::{NewSession, Session, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for session tokens.
///
/// Tokens are hashed with HMAC-SHA256 before they reach the repository; raw
/// tokens are never persisted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Resolves an active session (not revoked, not expired) to its user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))` if the token hash belongs to an active session
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Revokes a session. Revoking an unknown or already revoked session is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if a session was revoked by this call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Deletes sessions that expired before now. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn purge_expired(&self) -> Result<u64, AppError>;
}
