//! Core domain entities.
//!
//! - [`User`] - A registered account with its [`Role`]
//! - [`Session`] - A signed-in session identified by a hashed token
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewUser`, `NewSession`).

pub mod role;
pub mod session;
pub mod user;

pub use role::Role;
pub use session::{NewSession, Session};
pub use user::{NewUser, User};
