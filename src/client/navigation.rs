//! Route paths and the role guards in front of them.

use crate::api::dto::auth::AuthResult;
use crate::domain::entities::Role;

pub const HOME: &str = "/";
pub const SIGNIN: &str = "/signin";
pub const SIGNUP: &str = "/signup";
pub const USER_DASHBOARD: &str = "/user/dashboard";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

/// Landing page for a signed-in account.
pub fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD,
        Role::User => USER_DASHBOARD,
    }
}

/// Decision for a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
    NotFound,
}

/// Checks whether `path` may be shown for the given session.
///
/// Dashboards require the matching role and send everyone else to the signin
/// page. The signin and signup pages send an account that is already signed
/// in to its own dashboard.
pub fn guard(path: &str, session: Option<&AuthResult>) -> Access {
    let role = session.map(|auth| auth.user.role);

    match path {
        ADMIN_DASHBOARD => match role {
            Some(Role::Admin) => Access::Allow,
            _ => Access::Redirect(SIGNIN),
        },
        USER_DASHBOARD => match role {
            Some(Role::User) => Access::Allow,
            _ => Access::Redirect(SIGNIN),
        },
        SIGNIN | SIGNUP => match role {
            Some(role) => Access::Redirect(dashboard_for(role)),
            None => Access::Allow,
        },
        HOME => Access::Allow,
        _ => Access::NotFound,
    }
}

/// Receives the redirects issued by a form controller.
pub trait Navigator: Send {
    fn navigate(&mut self, path: &str);
}

/// Navigator that keeps every visited path.
#[derive(Debug, Clone, Default)]
pub struct History {
    visited: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent path, if any.
    pub fn current(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }
}

impl Navigator for History {
    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "Navigating");
        self.visited.push(path.to_string());
    }
}
