//! Signed-in session entity.

use chrono::{DateTime, Utc};

/// A server-side session.
///
/// Only the keyed hash of the token is stored. A session is usable while
/// `revoked_at` is unset and `expires_at` lies in the future.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Returns `true` when the session can still authenticate requests at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// Input data for opening a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_in: Duration, revoked: bool) -> Session {
        let now = Utc::now();
        Session {
            id: 1,
            user_id: 7,
            token_hash: "abc".to_string(),
            created_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn test_session_active() {
        assert!(session(Duration::hours(1), false).is_active(Utc::now()));
    }

    #[test]
    fn test_session_expired() {
        assert!(!session(Duration::hours(-1), false).is_active(Utc::now()));
    }

    #[test]
    fn test_session_revoked() {
        assert!(!session(Duration::hours(1), true).is_active(Utc::now()));
    }
}
