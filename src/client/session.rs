//! Signed-in session storage for the terminal client.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::api::dto::auth::AuthResult;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read access to the current session.
pub trait SessionReader: Send {
    /// The signed-in session, if there is one.
    fn current(&self) -> Option<AuthResult>;

    fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }
}

/// A session reader that can also be written.
pub trait SessionStore: SessionReader {
    fn save(&mut self, auth: &AuthResult) -> Result<(), SessionError>;

    fn clear(&mut self) -> Result<(), SessionError>;
}

/// Session kept in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    auth: Option<AuthResult>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(auth: AuthResult) -> Self {
        Self { auth: Some(auth) }
    }
}

impl SessionReader for MemorySession {
    fn current(&self) -> Option<AuthResult> {
        self.auth.clone()
    }
}

impl SessionStore for MemorySession {
    fn save(&mut self, auth: &AuthResult) -> Result<(), SessionError> {
        self.auth = Some(auth.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.auth = None;
        Ok(())
    }
}

/// Session persisted as a JSON file holding `{token, user}`.
///
/// A missing or unreadable file means no session.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionReader for FileSession {
    fn current(&self) -> Option<AuthResult> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read session file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(auth) => Some(auth),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }
}

impl SessionStore for FileSession {
    fn save(&mut self, auth: &AuthResult) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_vec_pretty(auth)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::auth::UserView;
    use crate::domain::entities::Role;
    use tempfile::TempDir;

    fn auth() -> AuthResult {
        AuthResult {
            token: "opaque-token".to_string(),
            user: UserView {
                id: 3,
                username: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                role: Role::Admin,
            },
        }
    }

    #[test]
    fn test_memory_session() {
        let mut session = MemorySession::new();
        assert!(!session.is_signed_in());

        session.save(&auth()).unwrap();
        assert_eq!(session.current(), Some(auth()));

        session.clear().unwrap();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_file_session_persists_between_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        FileSession::new(&path).save(&auth()).unwrap();

        let reopened = FileSession::new(&path);
        assert_eq!(reopened.current(), Some(auth()));
    }

    #[test]
    fn test_file_session_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        FileSession::new(&path).save(&auth()).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["token"], "opaque-token");
        assert_eq!(value["user"]["role"], 1);
    }

    #[test]
    fn test_file_session_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut session = FileSession::new(dir.path().join("absent.json"));

        assert!(session.current().is_none());
        assert!(session.clear().is_ok());
    }

    #[test]
    fn test_file_session_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileSession::new(&path).current().is_none());
    }

    #[test]
    fn test_file_session_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let mut session = FileSession::new(&path);

        session.save(&auth()).unwrap();
        assert!(path.exists());

        session.clear().unwrap();
        assert!(!path.exists());
        assert!(!session.is_signed_in());
    }
}
