//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the wire contract (`successMessage`, `errorMessage`),
//! so Serde renames are applied per type. The terminal client in
//! [`crate::client`] reuses these types for both directions.

pub mod auth;
pub mod dashboard;
pub mod health;
