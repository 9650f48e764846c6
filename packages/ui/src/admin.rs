//! Admin page: the user list, account creation and deletion.
//!
//! [`AdminState`] is a plain state machine; the async flows ([`refresh`],
//! [`confirm_delete`], [`add_user`]) drive it through a [`StateCell`] and
//! report a [`Flow`] telling the page whether the session survived.

use api::{ApiClient, ApiError, NewUser, SessionToken, User, UserApi};
use dioxus::prelude::*;
use store::AdminConfig;
use tracing::{info, warn};

use crate::components::{Button, ButtonVariant};
use crate::icons::FaUserPlus;
use crate::modal_overlay::ModalOverlay;
use crate::session::{use_session, SessionHandle};
use crate::state::StateCell;
use crate::user_form::{UserForm, UserFormModal};
use crate::users_table::UsersTable;
use crate::Icon;

pub const TOKEN_NOT_FOUND_MESSAGE: &str = "Authentication token not found.";
pub const MISSING_PASSWORD_MESSAGE: &str =
    "No initial password is configured for new accounts. Set users.initial_password in admin.toml.";

/// What the page must do after an operation settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The user set changed and should be fetched again.
    Refresh,
    /// The session was rejected or is missing.
    SignOut,
}

impl Flow {
    pub fn ends_session(self) -> bool {
        self == Flow::SignOut
    }
}

/// A failed account creation: the message for the form, and what the page
/// must do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddUserRejected {
    pub message: String,
    pub flow: Flow,
}

impl AddUserRejected {
    fn keep_form(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            flow: Flow::Continue,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdminState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Target of the open delete confirmation.
    pub pending_delete: Option<User>,
    /// A `delete-user` call is in flight.
    pub deleting: bool,
    pub add_open: bool,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: true,
            error: None,
            pending_delete: None,
            deleting: false,
            add_open: false,
        }
    }
}

impl AdminState {
    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a `list_users` outcome. A failure keeps the previous rows.
    pub fn finish_refresh(&mut self, result: Result<Vec<User>, ApiError>) -> Flow {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                Flow::Continue
            }
            Err(e) => self.fail(e),
        }
    }

    /// Ignored while another deletion is in flight.
    pub fn request_delete(&mut self, user: User) {
        if !self.deleting {
            self.pending_delete = Some(user);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Close the confirmation and hand out its target, marking the deletion
    /// in flight. `None` when nothing is pending or a deletion is running.
    pub fn take_pending_delete(&mut self) -> Option<User> {
        if self.deleting {
            return None;
        }
        let target = self.pending_delete.take()?;
        self.deleting = true;
        Some(target)
    }

    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> Flow {
        self.deleting = false;
        match result {
            Ok(()) => Flow::Refresh,
            Err(e) => self.fail(e),
        }
    }

    pub fn open_add(&mut self) {
        self.add_open = true;
    }

    pub fn close_add(&mut self) {
        self.add_open = false;
    }

    fn fail(&mut self, err: ApiError) -> Flow {
        self.error = Some(err.to_string());
        if err.ends_session() {
            Flow::SignOut
        } else {
            Flow::Continue
        }
    }
}

/// Reload the user list.
pub async fn refresh<A: UserApi>(
    api: &A,
    token: Option<&SessionToken>,
    state: &mut impl StateCell<AdminState>,
) -> Flow {
    state.update(AdminState::begin_refresh);
    let result = match token {
        Some(token) => api.list_users(token).await,
        None => Err(ApiError::SessionMissing),
    };
    if let Err(e) = &result {
        warn!("failed to fetch users: {e}");
    }
    state.update(|s| s.finish_refresh(result))
}

/// Delete the account awaiting confirmation, then reload on success.
///
/// The dialog closes and the target clears before the request is sent.
pub async fn confirm_delete<A: UserApi>(
    api: &A,
    token: Option<&SessionToken>,
    state: &mut impl StateCell<AdminState>,
) -> Flow {
    let Some(target) = state.update(AdminState::take_pending_delete) else {
        return Flow::Continue;
    };
    let Some(token) = token else {
        state.update(|s| {
            s.deleting = false;
            s.error = Some(TOKEN_NOT_FOUND_MESSAGE.to_string());
        });
        return Flow::SignOut;
    };

    let result = api.delete_user(token, &target.username).await;
    if let Err(e) = &result {
        warn!(username = %target.username, "failed to delete user: {e}");
    }
    match state.update(|s| s.finish_delete(result)) {
        Flow::Refresh => refresh(api, Some(token), state).await,
        flow => flow,
    }
}

/// Register `user` with the configured initial password.
///
/// `Err` carries the message for the form, which stays open unless the
/// session is gone. On success the add modal closes and the list reloads.
pub async fn add_user<A: UserApi>(
    api: &A,
    token: Option<&SessionToken>,
    initial_password: Option<&str>,
    user: &NewUser,
    state: &mut impl StateCell<AdminState>,
) -> Result<Flow, AddUserRejected> {
    let token = token.ok_or_else(|| AddUserRejected {
        message: TOKEN_NOT_FOUND_MESSAGE.to_string(),
        flow: Flow::SignOut,
    })?;
    let password =
        initial_password.ok_or_else(|| AddUserRejected::keep_form(MISSING_PASSWORD_MESSAGE))?;

    match api.create_user(token, user, password).await {
        Ok(()) => {
            state.update(AdminState::close_add);
            Ok(refresh(api, Some(token), state).await)
        }
        Err(e) if e.ends_session() => {
            warn!("session rejected while adding user: {e}");
            Ok(Flow::SignOut)
        }
        Err(e) => {
            warn!(username = %user.username, "failed to add user: {e}");
            Err(AddUserRejected::keep_form(e.to_string()))
        }
    }
}

pub fn confirm_delete_message(user: &User) -> String {
    format!(
        "Are you sure you want to delete the user \"{} {}\" ({})? This action cannot be undone.",
        user.first_name, user.last_name, user.username
    )
}

fn settle(flow: Flow, mut session: SessionHandle) {
    if flow.ends_session() {
        info!("signing out after rejected session");
        session.sign_out();
    }
}

#[component]
pub fn AdminPage() -> Element {
    let api = use_context::<ApiClient>();
    let config = use_context::<AdminConfig>();
    let session = use_session();
    let mut state = use_signal(AdminState::default);
    let mut form = use_signal(UserForm::new);

    let mount_api = api.clone();
    let _initial = use_resource(move || {
        let api = mount_api.clone();
        async move {
            let flow = refresh(&api, session.peek_token().as_ref(), &mut state).await;
            settle(flow, session);
        }
    });

    let delete_api = api.clone();
    let on_confirm_delete = move |_: MouseEvent| {
        let api = delete_api.clone();
        spawn(async move {
            let flow = confirm_delete(&api, session.peek_token().as_ref(), &mut state).await;
            settle(flow, session);
        });
    };

    let initial_password = config.initial_password().map(str::to_string);
    let on_submit_user = move |user: NewUser| {
        let api = api.clone();
        let password = initial_password.clone();
        spawn(async move {
            let token = session.peek_token();
            let outcome =
                add_user(&api, token.as_ref(), password.as_deref(), &user, &mut state).await;
            let flow = match outcome {
                Ok(flow) => {
                    form.write().finish_submit(Ok(()));
                    flow
                }
                Err(rejected) => {
                    form.write().finish_submit(Err(rejected.message));
                    rejected.flow
                }
            };
            settle(flow, session);
        });
    };

    let current = state.read().clone();
    let companies = config.users.companies.clone();
    let confirm_text = current.pending_delete.as_ref().map(confirm_delete_message);

    rsx! {
        div {
            class: "admin",
            div {
                class: "admin__header",
                h1 { "Admin Dashboard" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| {
                        state.write().open_add();
                        form.set(UserForm::new());
                    },
                    Icon { icon: FaUserPlus, width: 14, height: 14 }
                    "Add User"
                }
            }

            div {
                class: "panel",
                if current.loading {
                    div { class: "spinner", role: "status", "Loading users..." }
                } else {
                    if current.deleting {
                        div { class: "spinner", role: "status", "Deleting user..." }
                    }
                    if let Some(error) = current.error.clone() {
                        p { class: "banner banner--error", role: "alert", "{error}" }
                    }
                    UsersTable {
                        users: current.users.clone(),
                        disabled: current.deleting,
                        on_delete: move |user: User| state.write().request_delete(user),
                    }
                }
            }

            if current.add_open {
                UserFormModal {
                    form,
                    companies,
                    on_submit: on_submit_user,
                    on_close: move |_| {
                        state.write().close_add();
                        form.write().reset();
                    },
                }
            }

            if let Some(text) = confirm_text {
                ModalOverlay {
                    on_close: move |_| state.write().cancel_delete(),
                    h2 { class: "modal-card__title", "Confirm Deletion" }
                    p { "{text}" }
                    div {
                        class: "modal-card__actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| state.write().cancel_delete(),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Danger,
                            disabled: current.deleting,
                            onclick: on_confirm_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
