//! Account listing and role management.

use std::sync::Arc;

use crate::domain::entities::{Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::email_normalizer::normalize_email;

/// Service behind the admin dashboard and the `admin` CLI.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists every account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Changes the role of the account registered under `email`.
    ///
    /// The email is normalized first, so it may be given in any case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has this email.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn set_role(&self, email: &str, role: Role) -> Result<User, AppError> {
        let user = self.repository.set_role(&normalize_email(email), role).await?;
        tracing::info!(user_id = user.id, %role, "Role changed");
        Ok(user)
    }
}
