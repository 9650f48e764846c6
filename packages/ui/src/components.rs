//! Small form primitives shared by the console views.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Danger,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn--primary",
            ButtonVariant::Outline => "btn btn--outline",
            ButtonVariant::Danger => "btn btn--danger",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] class: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let classes = format!("{} {class}", variant.class());
    rsx! {
        button {
            class: "{classes}",
            r#type: "button",
            disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

#[component]
pub fn Input(
    id: String,
    value: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] autocomplete: String,
    #[props(default)] disabled: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "input",
            id,
            r#type: r#type,
            placeholder,
            autocomplete,
            value,
            disabled,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label {
            class: "label",
            r#for: html_for,
            {children}
        }
    }
}

/// A `<select>` over `(value, label)` pairs with an empty first option.
#[component]
pub fn Select(
    id: String,
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] placeholder: String,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        select {
            class: "input",
            id,
            value: value.clone(),
            onchange: move |evt| onchange.call(evt),
            option { value: "", selected: value.is_empty(), "{placeholder}" }
            for (option_value, label) in options.iter() {
                option {
                    key: "{option_value}",
                    value: "{option_value}",
                    selected: *option_value == value,
                    "{label}"
                }
            }
        }
    }
}
