//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod dashboard;
pub mod health;

pub use auth::{me_handler, signin_handler, signout_handler, signup_handler};
pub use dashboard::{admin_dashboard_handler, user_dashboard_handler};
pub use health::health_handler;
