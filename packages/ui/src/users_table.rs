use api::User;
use dioxus::prelude::*;

use crate::icons::FaTrash;
use crate::Icon;

pub const COLUMNS: [&str; 7] = [
    "Name",
    "Email",
    "Role",
    "Company",
    "Position",
    "Created At",
    "Actions",
];

/// Display text for the data cells of one row, in column order.
pub fn row_cells(user: &User) -> [String; 6] {
    [
        user.display_name(),
        user.username.clone(),
        user.display_role(),
        user.display_company(),
        user.display_position(),
        user.display_created_at(),
    ]
}

/// Table of managed accounts. Reports delete clicks upward and does nothing else.
/// `disabled` turns the delete buttons off while a deletion is running.
#[component]
pub fn UsersTable(
    users: Vec<User>,
    #[props(default)] disabled: bool,
    on_delete: EventHandler<User>,
) -> Element {
    rsx! {
        div {
            class: "users",
            h2 { class: "users__title", "Users" }
            if users.is_empty() {
                p { class: "users__empty", "No users yet." }
            } else {
                table {
                    class: "table",
                    aria_label: "users table",
                    thead {
                        tr {
                            for column in COLUMNS {
                                th { key: "{column}", "{column}" }
                            }
                        }
                    }
                    tbody {
                        for user in users {
                            UserRow {
                                key: "{user.username}",
                                user: user.clone(),
                                disabled,
                                on_delete,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UserRow(user: User, disabled: bool, on_delete: EventHandler<User>) -> Element {
    let [name, email, role, company, position, created_at] = row_cells(&user);

    rsx! {
        tr {
            th { scope: "row", "{name}" }
            td { "{email}" }
            td { "{role}" }
            td { "{company}" }
            td { "{position}" }
            td { "{created_at}" }
            td {
                class: "table__actions",
                button {
                    class: "icon-btn icon-btn--danger",
                    r#type: "button",
                    title: "Delete User",
                    disabled,
                    onclick: move |_| on_delete.call(user.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}
