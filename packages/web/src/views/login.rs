//! Login page view.

use dioxus::prelude::*;
use ui::LoginView;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "login-container",
            LoginView {
                on_success: move |_| {
                    nav.replace(Route::Admin {});
                },
            }
        }
    }
}
