use dioxus::prelude::*;

use crate::session::{use_session, LogoutButton};

const UI_CSS: Asset = asset!("/assets/ui.css");

/// Top bar. The logout button only shows while a session exists.
#[component]
pub fn Navbar(on_logout: EventHandler<()>) -> Element {
    let session = use_session();
    let signed_in = session.is_signed_in();

    rsx! {
        document::Link { rel: "stylesheet", href: UI_CSS }
        header {
            class: "navbar",
            span { class: "navbar__title", "ManDown" }
            if signed_in {
                LogoutButton { on_logout }
            }
        }
    }
}
