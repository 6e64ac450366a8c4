//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage and role changes
//! - [`PgSessionRepository`] - Session token storage and revocation

pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
