//! Signin and signup forms and the reducer that drives their submission.
//!
//! [`reduce`] is pure: it takes the current [`FormState`] and an [`Event`] and
//! returns the next state together with at most one [`Effect`] for the caller
//! to run. The API call and the redirect are the only side effects.

use std::fmt;

use crate::api::dto::auth::{AuthResult, SigninRequest, SignupRequest, SignupResponse};
use crate::client::api::ApiError;
use crate::client::navigation::dashboard_for;
use crate::utils::field_validator::{is_blank, is_valid_email, matches};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are Required";
pub const INVALID_EMAIL: &str = "Invalid Email";
pub const PASSWORD_MISMATCH: &str = "Password do not match";

/// Request produced by a form that passed its checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Signin(SigninRequest),
    Signup(SignupRequest),
}

/// Successful answer to a [`Call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    SignedIn(AuthResult),
    Registered(SignupResponse),
}

/// One input of a form.
pub trait FormField: Copy + fmt::Debug + Eq + Send {
    /// Prompt shown for this input.
    fn label(self) -> &'static str;

    /// Whether the input must not be echoed.
    fn is_secret(self) -> bool;
}

/// Field values of a credential form plus its submit-time checks.
pub trait CredentialForm: Clone + Default + fmt::Debug + Send {
    type Field: FormField + 'static;

    /// All fields in display order.
    const FIELDS: &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);

    /// Runs the checks in order and returns the first failing message, or
    /// the request to send.
    fn check(&self) -> Result<Call, &'static str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigninField {
    Email,
    Password,
}

impl FormField for SigninField {
    fn label(self) -> &'static str {
        match self {
            SigninField::Email => "Email address",
            SigninField::Password => "Password",
        }
    }

    fn is_secret(self) -> bool {
        self == SigninField::Password
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SigninForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninForm")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl CredentialForm for SigninForm {
    type Field = SigninField;

    const FIELDS: &'static [SigninField] = &[SigninField::Email, SigninField::Password];

    fn value(&self, field: SigninField) -> &str {
        match field {
            SigninField::Email => &self.email,
            SigninField::Password => &self.password,
        }
    }

    fn set(&mut self, field: SigninField, value: String) {
        match field {
            SigninField::Email => self.email = value,
            SigninField::Password => self.password = value,
        }
    }

    fn check(&self) -> Result<Call, &'static str> {
        if is_blank(&self.email) || is_blank(&self.password) {
            return Err(ALL_FIELDS_REQUIRED);
        }
        if !is_valid_email(&self.email) {
            return Err(INVALID_EMAIL);
        }

        Ok(Call::Signin(SigninRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Username,
    Email,
    Password,
    PasswordConfirm,
}

impl FormField for SignupField {
    fn label(self) -> &'static str {
        match self {
            SignupField::Username => "Username",
            SignupField::Email => "Email address",
            SignupField::Password => "Create password",
            SignupField::PasswordConfirm => "Confirm password",
        }
    }

    fn is_secret(self) -> bool {
        matches!(self, SignupField::Password | SignupField::PasswordConfirm)
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("password_confirm", &"***")
            .finish()
    }
}

impl CredentialForm for SignupForm {
    type Field = SignupField;

    const FIELDS: &'static [SignupField] = &[
        SignupField::Username,
        SignupField::Email,
        SignupField::Password,
        SignupField::PasswordConfirm,
    ];

    fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Username => &self.username,
            SignupField::Email => &self.email,
            SignupField::Password => &self.password,
            SignupField::PasswordConfirm => &self.password_confirm,
        }
    }

    fn set(&mut self, field: SignupField, value: String) {
        match field {
            SignupField::Username => self.username = value,
            SignupField::Email => self.email = value,
            SignupField::Password => self.password = value,
            SignupField::PasswordConfirm => self.password_confirm = value,
        }
    }

    fn check(&self) -> Result<Call, &'static str> {
        if is_blank(&self.username)
            || is_blank(&self.email)
            || is_blank(&self.password)
            || is_blank(&self.password_confirm)
        {
            return Err(ALL_FIELDS_REQUIRED);
        }
        if !is_valid_email(&self.email) {
            return Err(INVALID_EMAIL);
        }
        if !matches(&self.password, &self.password_confirm) {
            return Err(PASSWORD_MISMATCH);
        }

        Ok(Call::Signup(SignupRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    /// The last request failed. Accepts edits and submits like `Editing`.
    Failed,
}

impl Phase {
    fn accepts_submit(self) -> bool {
        matches!(self, Phase::Editing | Phase::Failed)
    }
}

/// Message shown under the form. Only one kind can be present at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState<F> {
    pub fields: F,
    pub message: Option<Message>,
    pub phase: Phase,
}

impl<F: CredentialForm> FormState<F> {
    pub fn new(fields: F) -> Self {
        Self {
            fields,
            message: None,
            phase: Phase::Editing,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        match &self.message {
            Some(Message::Error(text)) => Some(text),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.message {
            Some(Message::Success(text)) => Some(text),
            _ => None,
        }
    }

    /// Marks the submission as failed with `message`.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Failed;
        self.message = Some(Message::Error(message.into()));
    }
}

#[derive(Debug)]
pub enum Event<F: CredentialForm> {
    Edit(F::Field, String),
    Submit,
    Resolved(Result<Reply, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the request to the server.
    Call(Call),
    /// Store the session and go to `redirect`.
    SignedIn {
        auth: AuthResult,
        redirect: &'static str,
    },
}

#[derive(Debug)]
pub struct Step<F> {
    pub state: FormState<F>,
    pub effect: Option<Effect>,
}

impl<F> Step<F> {
    fn idle(state: FormState<F>) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Computes the next form state for `event`.
pub fn reduce<F: CredentialForm>(mut state: FormState<F>, event: Event<F>) -> Step<F> {
    match event {
        Event::Edit(field, value) => {
            if state.is_submitting() {
                return Step::idle(state);
            }
            state.fields.set(field, value);
            state.message = None;
            state.phase = Phase::Editing;
            Step::idle(state)
        }
        Event::Submit => {
            if !state.phase.accepts_submit() {
                tracing::debug!(phase = ?state.phase, "Ignoring submit");
                return Step::idle(state);
            }

            match state.fields.check() {
                Err(message) => {
                    tracing::debug!(message, "Form rejected before sending");
                    state.message = Some(Message::Error(message.to_string()));
                    state.phase = Phase::Editing;
                    Step::idle(state)
                }
                Ok(call) => {
                    state.message = None;
                    state.phase = Phase::Submitting;
                    Step {
                        state,
                        effect: Some(Effect::Call(call)),
                    }
                }
            }
        }
        Event::Resolved(result) => {
            if !state.is_submitting() {
                return Step::idle(state);
            }

            match result {
                Ok(Reply::SignedIn(auth)) => {
                    let redirect = dashboard_for(auth.user.role);
                    state.phase = Phase::Succeeded;
                    Step {
                        state,
                        effect: Some(Effect::SignedIn { auth, redirect }),
                    }
                }
                Ok(Reply::Registered(response)) => {
                    state.fields = F::default();
                    state.message = Some(Message::Success(response.success_message));
                    state.phase = Phase::Editing;
                    Step::idle(state)
                }
                Err(e) => {
                    state.fail(e.user_message());
                    Step::idle(state)
                }
            }
        }
    }
}
