//! User account entity.

use chrono::{DateTime, Utc};

use super::Role;

/// A registered account.
///
/// `email` is stored normalized (see [`crate::utils::email_normalizer`]) and is
/// unique. `password_hash` is a PHC-format argon2 string; the plain password is
/// never kept.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            role,
            created_at,
        }
    }
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let now = Utc::now();
        let user = User::new(
            1,
            "John Doe".to_string(),
            "johndoe@admin.com".to_string(),
            "$argon2id$v=19$...".to_string(),
            Role::Admin,
            now,
        );

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "John Doe");
        assert!(user.role.is_admin());
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn test_new_user_creation() {
        let new_user = NewUser {
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        };

        assert_eq!(new_user.email, "jane@example.com");
        assert_eq!(new_user.role, Role::User);
    }
}
