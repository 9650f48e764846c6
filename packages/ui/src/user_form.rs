//! Create/edit form for a managed account.
//!
//! [`UserForm`] holds the raw input and runs validation at submission time;
//! [`UserFormModal`] renders it. The modal never talks to the API itself: a
//! validated [`NewUser`] is handed to `on_submit`, and the caller reports the
//! outcome back through [`UserForm::finish_submit`].

use api::models::title_case;
use api::{DraftField, NewUser, NewUserDraft, Position, Role, User};
use dioxus::prelude::*;

use crate::components::{Input, Label, Select};
use crate::modal_overlay::ModalOverlay;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormMode {
    #[default]
    Create,
    /// Pre-filled from an existing record. The username is locked.
    Edit(User),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserForm {
    pub draft: NewUserDraft,
    pub error: Option<String>,
    pub submitting: bool,
    pub mode: FormMode,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(user: &User) -> Self {
        Self {
            draft: NewUserDraft::from_user(user),
            mode: FormMode::Edit(user.clone()),
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit User"
        } else {
            "Add New User"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update User"
        } else {
            "Add User"
        }
    }

    /// Discard input and errors, keeping the mode.
    pub fn reset(&mut self) {
        self.draft = match &self.mode {
            FormMode::Create => NewUserDraft::default(),
            FormMode::Edit(user) => NewUserDraft::from_user(user),
        };
        self.error = None;
        self.submitting = false;
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        if field == DraftField::Username && self.is_editing() {
            return;
        }
        self.draft.set(field, value);
    }

    /// Validate the draft. On success the form enters `submitting` and the
    /// account to register is returned; on failure the error is shown.
    pub fn begin_submit(&mut self) -> Option<NewUser> {
        if self.submitting {
            return None;
        }
        match self.draft.validate() {
            Ok(user) => {
                self.error = None;
                self.submitting = true;
                Some(user)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        self.submitting = false;
        self.error = outcome.err();
    }
}

fn role_options() -> Vec<(String, String)> {
    Role::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

fn position_options() -> Vec<(String, String)> {
    Position::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.label().to_string()))
        .collect()
}

fn company_options(companies: &[String]) -> Vec<(String, String)> {
    companies
        .iter()
        .map(|c| (c.to_lowercase(), title_case(c)))
        .collect()
}

#[component]
pub fn UserFormModal(
    form: Signal<UserForm>,
    companies: Vec<String>,
    on_submit: EventHandler<NewUser>,
    on_close: EventHandler<()>,
) -> Element {
    let mut form = form;
    let current = form.read().clone();
    let submitting = current.submitting;
    let editing = current.is_editing();
    let title = current.title();
    let submit_label = current.submit_label();
    let error = current.error;
    let draft = current.draft;

    let close = move |_: ()| {
        if !form.peek().submitting {
            on_close.call(());
        }
    };

    rsx! {
        ModalOverlay {
            on_close: close,
            form {
                class: "user-form",
                novalidate: true,
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let next = form.write().begin_submit();
                    if let Some(user) = next {
                        on_submit.call(user);
                    }
                },

                h2 { class: "user-form__title", "{title}" }

                div {
                    class: "field",
                    Label { html_for: "user-username", "Email" }
                    Input {
                        id: "user-username",
                        value: draft.username.clone(),
                        autocomplete: "off",
                        disabled: editing || submitting,
                        oninput: move |evt: FormEvent| {
                            form.write().set_field(DraftField::Username, evt.value())
                        },
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-first-name", "First Name" }
                    Input {
                        id: "user-first-name",
                        value: draft.first_name.clone(),
                        disabled: submitting,
                        oninput: move |evt: FormEvent| {
                            form.write().set_field(DraftField::FirstName, evt.value())
                        },
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-last-name", "Last Name" }
                    Input {
                        id: "user-last-name",
                        value: draft.last_name.clone(),
                        disabled: submitting,
                        oninput: move |evt: FormEvent| {
                            form.write().set_field(DraftField::LastName, evt.value())
                        },
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-role", "Role" }
                    Select {
                        id: "user-role",
                        value: draft.role.clone(),
                        options: role_options(),
                        placeholder: "Select a role",
                        onchange: move |evt: FormEvent| {
                            form.write().set_field(DraftField::Role, evt.value())
                        },
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-position", "Position" }
                    Select {
                        id: "user-position",
                        value: draft.position.clone(),
                        options: position_options(),
                        placeholder: "Select a position",
                        onchange: move |evt: FormEvent| {
                            form.write().set_field(DraftField::Position, evt.value())
                        },
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-company", "Company" }
                    Select {
                        id: "user-company",
                        value: draft.company.clone(),
                        options: company_options(&companies),
                        placeholder: "Select a company",
                        onchange: move |evt: FormEvent| {
                            form.write().set_field(DraftField::Company, evt.value())
                        },
                    }
                }

                if let Some(error) = error {
                    p { class: "form-error", role: "alert", "{error}" }
                }

                div {
                    class: "user-form__actions",
                    button {
                        class: "btn btn--outline",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn--primary",
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Saving..." } else { "{submit_label}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut UserForm, role: &str) {
        form.set_field(DraftField::Username, "new@corp.com".into());
        form.set_field(DraftField::FirstName, "New".into());
        form.set_field(DraftField::LastName, "Hire".into());
        form.set_field(DraftField::Role, role.into());
        form.set_field(DraftField::Position, "worker".into());
        form.set_field(DraftField::Company, "company b".into());
    }

    #[test]
    fn blank_field_for_user_role_is_rejected() {
        let mut form = UserForm::new();
        fill(&mut form, "user");
        form.set_field(DraftField::LastName, String::new());

        assert!(form.begin_submit().is_none());
        assert_eq!(form.error.as_deref(), Some("All fields are required."));
        assert!(!form.submitting);
    }

    #[test]
    fn admin_role_accepts_the_same_blanks() {
        let mut form = UserForm::new();
        fill(&mut form, "admin");
        form.set_field(DraftField::LastName, String::new());
        form.set_field(DraftField::Company, String::new());

        let user = form.begin_submit().unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.company, None);
        assert!(form.submitting);
    }

    #[test]
    fn bad_email_is_rejected_for_any_role() {
        for role in ["admin", "user"] {
            let mut form = UserForm::new();
            fill(&mut form, role);
            form.set_field(DraftField::Username, "not-an-email".into());
            assert!(form.begin_submit().is_none());
            assert_eq!(
                form.error.as_deref(),
                Some("Please enter a valid email address.")
            );
        }
    }

    #[test]
    fn failed_submission_keeps_input_and_shows_message() {
        let mut form = UserForm::new();
        fill(&mut form, "user");
        form.begin_submit().unwrap();
        form.finish_submit(Err("User already exists".into()));

        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("User already exists"));
        assert_eq!(form.draft.username, "new@corp.com");
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = UserForm::new();
        fill(&mut form, "user");
        form.error = Some("x".into());
        form.reset();
        assert_eq!(form, UserForm::new());
    }

    #[test]
    fn edit_mode_locks_username_and_relabels() {
        let existing = User {
            username: "a@b.com".into(),
            first_name: "Ann".into(),
            last_name: "Bell".into(),
            role: "User".into(),
            company: "Company A".into(),
            company_position: "worker".into(),
            ..Default::default()
        };
        let mut form = UserForm::editing(&existing);
        assert_eq!(form.title(), "Edit User");
        assert_eq!(form.submit_label(), "Update User");
        assert_eq!(form.draft.role, "user");
        assert_eq!(form.draft.company, "company a");

        form.set_field(DraftField::Username, "other@b.com".into());
        form.set_field(DraftField::FirstName, "Anne".into());
        assert_eq!(form.draft.username, "a@b.com");
        assert_eq!(form.draft.first_name, "Anne");

        form.reset();
        assert_eq!(form.draft.first_name, "Ann");
    }

    #[test]
    fn create_mode_labels() {
        let form = UserForm::new();
        assert_eq!(form.title(), "Add New User");
        assert_eq!(form.submit_label(), "Add User");
    }

    #[test]
    fn company_options_are_title_cased() {
        let options = company_options(&["company a".to_string()]);
        assert_eq!(options, vec![("company a".to_string(), "Company A".to_string())]);
    }
}
