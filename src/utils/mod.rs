//! Utility functions shared by the server and the terminal client.
//!
//! - [`field_validator`] - Credential field predicates
//! - [`email_normalizer`] - Canonical form for email addresses
//! - [`token_generator`] - Opaque session token generation

pub mod email_normalizer;
pub mod field_validator;
pub mod token_generator;
