//! Async driver for a credential form.

use std::sync::Arc;

use crate::client::api::{ApiError, AuthApi, GENERIC_FAILURE};
use crate::client::form::{Call, CredentialForm, Effect, Event, FormState, Reply, reduce};
use crate::client::navigation::{Navigator, dashboard_for};
use crate::client::session::{SessionError, SessionStore};

/// Result of [`FormController::mount`].
pub enum Mount<F: CredentialForm, S, N> {
    Ready(FormController<F, S, N>),
    /// A session already existed. The navigator was sent to `to`.
    Redirected { to: &'static str, navigator: N },
}

/// Runs the effects produced by [`reduce`]: API calls, session writes and
/// redirects. Processes one event at a time.
pub struct FormController<F: CredentialForm, S, N> {
    state: FormState<F>,
    api: Arc<dyn AuthApi>,
    session: S,
    navigator: N,
}

impl<F, S, N> FormController<F, S, N>
where
    F: CredentialForm,
    S: SessionStore,
    N: Navigator,
{
    /// Creates a controller for `fields`, unless `session` already holds a
    /// signed-in account. In that case the navigator goes to the account's
    /// dashboard and no form is created.
    pub fn mount(fields: F, api: Arc<dyn AuthApi>, session: S, mut navigator: N) -> Mount<F, S, N> {
        if let Some(auth) = session.current() {
            let to = dashboard_for(auth.user.role);
            tracing::debug!(to, "Already signed in");
            navigator.navigate(to);
            return Mount::Redirected { to, navigator };
        }

        Mount::Ready(Self {
            state: FormState::new(fields),
            api,
            session,
            navigator,
        })
    }

    pub fn state(&self) -> &FormState<F> {
        &self.state
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_parts(self) -> (FormState<F>, S, N) {
        (self.state, self.session, self.navigator)
    }

    pub fn edit(&mut self, field: F::Field, value: impl Into<String>) {
        self.apply(Event::Edit(field, value.into()));
    }

    /// Submits the form and waits for the outcome.
    pub async fn submit(&mut self) -> &FormState<F> {
        let Some(Effect::Call(call)) = self.apply(Event::Submit) else {
            return &self.state;
        };

        let result = self.dispatch(call).await;
        if let Err(ApiError::Transport(cause)) = &result {
            tracing::warn!(%cause, "Auth request failed");
        }

        if let Some(Effect::SignedIn { auth, redirect }) = self.apply(Event::Resolved(result)) {
            match self.session.save(&auth) {
                Ok(()) => {
                    tracing::info!(user_id = auth.user.id, role = %auth.user.role, "Signed in");
                    self.navigator.navigate(redirect);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to store session");
                    self.state.fail(GENERIC_FAILURE);
                }
            }
        }

        &self.state
    }

    fn apply(&mut self, event: Event<F>) -> Option<Effect> {
        let step = reduce(std::mem::take(&mut self.state), event);
        self.state = step.state;
        step.effect
    }

    async fn dispatch(&self, call: Call) -> Result<Reply, ApiError> {
        match call {
            Call::Signin(request) => self.api.signin(request).await.map(Reply::SignedIn),
            Call::Signup(request) => self.api.signup(request).await.map(Reply::Registered),
        }
    }
}

/// Ends the current session: revokes it on the server, then forgets it locally.
///
/// A failed revocation is logged and does not keep the local session.
///
/// # Errors
///
/// Returns [`SessionError`] if the local session cannot be removed.
pub async fn sign_out<S: SessionStore>(api: &dyn AuthApi, session: &mut S) -> Result<bool, SessionError> {
    let Some(auth) = session.current() else {
        return Ok(false);
    };

    if let Err(e) = api.signout(&auth.token).await {
        tracing::warn!(error = %e, "Server-side signout failed");
    }

    session.clear()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::auth::{AuthResult, SignupResponse, UserView};
    use crate::client::api::MockAuthApi;
    use crate::client::form::{Phase, SigninField, SigninForm, SignupField, SignupForm};
    use crate::client::navigation::History;
    use crate::client::session::{MemorySession, SessionReader};
    use crate::domain::entities::Role;

    type Signin = FormController<SigninForm, MemorySession, History>;

    fn auth(role: Role) -> AuthResult {
        AuthResult {
            token: "token-123".to_string(),
            user: UserView {
                id: 9,
                username: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                role,
            },
        }
    }

    fn ready<F: CredentialForm>(
        api: MockAuthApi,
        session: MemorySession,
    ) -> FormController<F, MemorySession, History> {
        match FormController::mount(F::default(), Arc::new(api), session, History::new()) {
            Mount::Ready(controller) => controller,
            Mount::Redirected { to, .. } => panic!("unexpected redirect to {to}"),
        }
    }

    fn fill_signin(controller: &mut Signin) {
        controller.edit(SigninField::Email, "jane@example.com");
        controller.edit(SigninField::Password, "secret1");
    }

    #[test]
    fn test_mount_redirects_signed_in_account() {
        let mount = FormController::mount(
            SignupForm::default(),
            Arc::new(MockAuthApi::new()),
            MemorySession::signed_in(auth(Role::Admin)),
            History::new(),
        );

        match mount {
            Mount::Redirected { to, navigator } => {
                assert_eq!(to, "/admin/dashboard");
                assert_eq!(navigator.current(), Some("/admin/dashboard"));
            }
            Mount::Ready(_) => panic!("form should not be created"),
        }
    }

    #[tokio::test]
    async fn test_admin_signin_saves_session_and_redirects() {
        let mut api = MockAuthApi::new();
        api.expect_signin()
            .withf(|req| req.email == "jane@example.com" && req.password == "secret1")
            .times(1)
            .returning(|_| Ok(auth(Role::Admin)));

        let mut controller: Signin = ready(api, MemorySession::new());
        fill_signin(&mut controller);

        let state = controller.submit().await;
        assert_eq!(state.phase, Phase::Succeeded);

        assert_eq!(controller.session().current(), Some(auth(Role::Admin)));
        assert_eq!(controller.navigator().current(), Some("/admin/dashboard"));
    }

    #[tokio::test]
    async fn test_user_signin_redirects_to_user_dashboard() {
        let mut api = MockAuthApi::new();
        api.expect_signin().returning(|_| Ok(auth(Role::User)));

        let mut controller: Signin = ready(api, MemorySession::new());
        fill_signin(&mut controller);
        controller.submit().await;

        assert_eq!(controller.navigator().current(), Some("/user/dashboard"));
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_api() {
        let mut api = MockAuthApi::new();
        api.expect_signin().never();

        let mut controller: Signin = ready(api, MemorySession::new());
        controller.edit(SigninField::Email, "jane");
        controller.edit(SigninField::Password, "secret1");

        let state = controller.submit().await;

        assert_eq!(state.error(), Some("Invalid Email"));
        assert!(controller.navigator().current().is_none());
    }

    #[tokio::test]
    async fn test_rejected_signin_keeps_session_empty() {
        let mut api = MockAuthApi::new();
        api.expect_signin().returning(|_| {
            Err(ApiError::Rejected {
                status: 400,
                message: "Invalid credentials".to_string(),
            })
        });

        let mut controller: Signin = ready(api, MemorySession::new());
        fill_signin(&mut controller);

        let state = controller.submit().await;
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.error(), Some("Invalid credentials"));

        assert!(!controller.session().is_signed_in());
        assert!(controller.navigator().visited().is_empty());
    }

    #[tokio::test]
    async fn test_signup_success_stays_on_form() {
        let mut api = MockAuthApi::new();
        api.expect_signup()
            .withf(|req| req.username == "Jane" && req.password == "secret1")
            .times(1)
            .returning(|_| {
                Ok(SignupResponse {
                    success_message: "Registration success. Please signin.".to_string(),
                })
            });

        let mut controller: FormController<SignupForm, _, _> = ready(api, MemorySession::new());
        controller.edit(SignupField::Username, "Jane");
        controller.edit(SignupField::Email, "jane@example.com");
        controller.edit(SignupField::Password, "secret1");
        controller.edit(SignupField::PasswordConfirm, "secret1");

        let state = controller.submit().await;

        assert_eq!(state.success(), Some("Registration success. Please signin."));
        assert_eq!(state.fields, SignupForm::default());
        assert!(controller.navigator().visited().is_empty());
        assert!(!controller.session().is_signed_in());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_clears() {
        let mut api = MockAuthApi::new();
        api.expect_signout()
            .withf(|token| token == "token-123")
            .times(1)
            .returning(|_| Ok(()));

        let mut session = MemorySession::signed_in(auth(Role::User));

        assert!(sign_out(&api, &mut session).await.unwrap());
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_server_fails() {
        let mut api = MockAuthApi::new();
        api.expect_signout()
            .returning(|_| Err(ApiError::Transport("connection refused".into())));

        let mut session = MemorySession::signed_in(auth(Role::User));

        assert!(sign_out(&api, &mut session).await.unwrap());
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_sign_out_without_session() {
        let mut api = MockAuthApi::new();
        api.expect_signout().never();

        let mut session = MemorySession::new();

        assert!(!sign_out(&api, &mut session).await.unwrap());
    }
}
