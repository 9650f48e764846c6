//! This crate contains all shared UI for the ManDown admin console.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod state;
pub use state::StateCell;

pub mod guard;
pub use guard::{fallback_for, redirect_for, Redirect};

mod session;
pub use session::{
    complete_login, end_session, make_token_store, use_session, LogoutButton, SessionHandle,
    SessionProvider,
};

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod navbar;
pub use navbar::Navbar;

pub mod login;
pub use login::{LoginForm, LoginView};

mod users_table;
pub use users_table::UsersTable;

pub mod user_form;
pub use user_form::{FormMode, UserForm, UserFormModal};

pub mod admin;
pub use admin::{AdminPage, AdminState, Flow};

#[cfg(test)]
mod testing;
