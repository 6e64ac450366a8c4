//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the maintenance CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Signup, signin, session tokens
//! - [`services::user_service::UserService`] - Account listing and role changes

pub mod services;
