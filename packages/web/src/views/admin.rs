use dioxus::prelude::*;
use ui::AdminPage;

#[component]
pub fn Admin() -> Element {
    rsx! {
        div {
            class: "admin-container",
            AdminPage {}
        }
    }
}
