//! Sign-in screen with email/password form.

use dioxus::prelude::*;
use store::{Screen, SignInForm};

use crate::dialogs::Spinner;
use crate::session::{use_api, use_credential_sink, use_session};

/// Sign-in screen component.
///
/// `notice` is a one-off message handed over by another screen, shown until
/// the form produces its own error.
#[component]
pub fn SignInScreen(notice: Option<String>) -> Element {
    let mut session = use_session();
    let api = use_api();
    let credentials = use_credential_sink();
    let mut form = use_signal(SignInForm::default);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if session.peek().notice().is_some() {
            session.write().clear_notice();
        }
        let Some(request) = form.write().begin() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            let result = api.exchange_token(&request.email, &request.password).await;
            let credential = form.write().finish(result);
            if let Some(credential) = credential {
                credentials.send(credential);
            }
        });
    };

    let state = form.read();
    let message = state.error().map(str::to_string).or(notice);
    let in_flight = state.is_in_flight();

    rsx! {
        div {
            class: "screen auth",

            h1 { class: "auth__title", "Fideliza+" }
            p { class: "auth__subtitle", "Bem-vindo de volta!" }

            form {
                onsubmit: handle_login,
                class: "auth__form",

                if let Some(err) = message {
                    div { class: "auth__error", "{err}" }
                }

                input {
                    class: "input",
                    r#type: "email",
                    placeholder: "Email",
                    value: "{state.email}",
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }

                input {
                    class: "input",
                    r#type: "password",
                    placeholder: "Senha",
                    value: "{state.password}",
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }

                button {
                    class: "btn btn--primary btn--block",
                    r#type: "submit",
                    disabled: in_flight,
                    if in_flight {
                        Spinner {}
                    } else {
                        "Entrar"
                    }
                }
            }

            p {
                class: "auth__switch",
                "Não tem uma conta? "
                button {
                    class: "link",
                    r#type: "button",
                    onclick: move |_| {
                        session.write().show(Screen::SignUp);
                    },
                    "Registe-se"
                }
            }
        }
    }
}
