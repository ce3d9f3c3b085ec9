use dioxus::prelude::*;

use crate::services::UserErrorFormatter;
use crate::ui_dioxus::components::FormField;
use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn LoginView() -> Element {
    let app = use_app();
    let mut auth = app.auth;
    let navigator = use_navigator();

    let mut registering = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_: FormEvent| {
        let result = if registering() {
            auth.write().register(&email.read(), &password.read(), &name.read())
        } else {
            auth.write().login(&email.read(), &password.read())
        };

        match result {
            Ok(_) => {
                password.set(String::new());
                error.set(None);
                navigator.push(Route::Home {});
            }
            Err(e) => error.set(Some(UserErrorFormatter::format_for_ui(&e.into()))),
        }
    };

    rsx! {
        div {
            class: "auth-card",
            h1 { if registering() { "Create an account" } else { "Sign in" } }

            form {
                prevent_default: "onsubmit",
                onsubmit: submit,

                if registering() {
                    FormField { label: "Name", value: name(), oninput: move |v| name.set(v) }
                }
                FormField {
                    label: "Email",
                    kind: "email",
                    value: email(),
                    oninput: move |v| email.set(v),
                }
                FormField {
                    label: "Password",
                    kind: "password",
                    value: password(),
                    oninput: move |v| password.set(v),
                }

                if let Some(message) = error() {
                    div { class: "form-error", "{message}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    if registering() { "Register" } else { "Sign in" }
                }
            }

            button {
                class: "btn btn-link",
                onclick: move |_| {
                    registering.toggle();
                    error.set(None);
                },
                if registering() { "Already have an account? Sign in" } else { "New here? Create an account" }
            }

            p { class: "muted", "Demo accounts: user@example.com / password, admin@example.com / secret123" }
        }
    }
}

