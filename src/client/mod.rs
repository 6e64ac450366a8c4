//! Terminal-side credential workflow.
//!
//! - [`form`] - signin/signup forms and the submission reducer
//! - [`controller`] - async driver that executes the reducer's effects
//! - [`api`] - HTTP client for the auth endpoints
//! - [`session`] - where a signed-in session is kept between runs
//! - [`navigation`] - route paths and role guards

pub mod api;
pub mod controller;
pub mod form;
pub mod navigation;
pub mod session;

pub use api::{ApiError, AuthApi, HttpAuthClient};
pub use controller::{FormController, Mount, sign_out};
pub use form::{FormState, Message, Phase, SigninField, SigninForm, SignupField, SignupForm};
pub use navigation::{Access, History, Navigator, guard};
pub use session::{FileSession, MemorySession, SessionError, SessionReader, SessionStore};
