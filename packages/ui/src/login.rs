//! Login form state and the sign-in flow.

use api::{ApiClient, SessionToken, UserApi};
use dioxus::prelude::*;
use tracing::warn;

use crate::components::{Input, Label};
use crate::session::use_session;
use crate::state::StateCell;

pub const MISSING_CREDENTIALS: &str = "Please enter your email and password.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub phase: LoginPhase,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn is_submitting(&self) -> bool {
        self.phase == LoginPhase::Submitting
    }

    /// Move to `Submitting` and hand out the credentials to send.
    ///
    /// Returns `None` while a submission is in flight, or when a field is
    /// blank (which sets the error instead).
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.is_submitting() {
            return None;
        }
        let username = self.username.trim().to_string();
        if username.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_CREDENTIALS.to_string());
            return None;
        }
        self.error = None;
        self.phase = LoginPhase::Submitting;
        Some((username, self.password.clone()))
    }

    /// Back to `Idle`. The password is never kept past an attempt.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        self.phase = LoginPhase::Idle;
        self.password.clear();
        self.error = outcome.err();
    }
}

/// Run one login attempt against `api`, returning the issued token.
///
/// The caller stores the token; nothing is stored on failure.
pub async fn submit_login<A: UserApi>(
    api: &A,
    form: &mut impl StateCell<LoginForm>,
) -> Option<SessionToken> {
    let (username, password) = form.update(LoginForm::begin_submit)?;

    match api.login(&username, &password).await {
        Ok(token) => {
            form.update(|f| f.finish_submit(Ok(())));
            Some(token)
        }
        Err(e) => {
            warn!("login failed: {e}");
            form.update(|f| f.finish_submit(Err(e.to_string())));
            None
        }
    }
}

/// Sign-in card. Stores the token in the session and calls `on_success`.
#[component]
pub fn LoginView(on_success: EventHandler<()>) -> Element {
    let api = use_context::<ApiClient>();
    let mut session = use_session();
    let mut form = use_signal(LoginForm::default);

    let state = form.read();
    let submitting = state.is_submitting();
    let username = state.username.clone();
    let password = state.password.clone();
    let error = state.error.clone();
    drop(state);

    rsx! {
        div {
            class: "login",
            h1 { class: "login__title", "Sign in" }
            form {
                class: "login__form",
                novalidate: true,
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let api = api.clone();
                    spawn(async move {
                        if let Some(token) = submit_login(&api, &mut form).await {
                            session.sign_in(token);
                            on_success.call(());
                        }
                    });
                },

                div {
                    class: "field",
                    Label { html_for: "email", "Email Address" }
                    Input {
                        id: "email",
                        value: username,
                        autocomplete: "email",
                        disabled: submitting,
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "password", "Password" }
                    Input {
                        id: "password",
                        r#type: "password",
                        value: password,
                        autocomplete: "current-password",
                        disabled: submitting,
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }

                if let Some(error) = error {
                    p { class: "form-error", role: "alert", "{error}" }
                }

                button {
                    class: "btn btn--primary login__submit",
                    r#type: "submit",
                    disabled: submitting,
                    if submitting { "Signing in..." } else { "Sign In" }
                }
            }
        }
    }
}
