mod login;
pub use login::Login;

mod admin;
pub use admin::Admin;

use dioxus::prelude::*;

/// `/` always redirects; the guard decides where.
#[component]
pub fn Root() -> Element {
    rsx! {}
}

/// Unknown paths redirect like `/`.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    rsx! {}
}
