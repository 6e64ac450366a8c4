//! Account role discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an account, deciding which dashboard it lands on after signin.
///
/// Stored as a `SMALLINT` and sent over the wire as a number:
/// `0` for [`Role::User`], `1` for [`Role::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Returns the numeric code used in storage and on the wire.
    pub fn code(self) -> i16 {
        match self {
            Role::User => 0,
            Role::Admin => 1,
        }
    }

    /// Returns `true` for administrators.
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl From<Role> for i16 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl TryFrom<i16> for Role {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Role::User),
            1 => Ok(Role::Admin),
            other => Err(format!("unknown role code: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
