//! Sign-up screen with name/email/password form.

use dioxus::prelude::*;
use store::{messages, Screen, SignUpForm, SignUpOutcome};

use crate::dialogs::Spinner;
use crate::session::{use_api, use_credential_sink, use_session};

/// Sign-up screen component.
#[component]
pub fn SignUpScreen() -> Element {
    let mut session = use_session();
    let api = use_api();
    let credentials = use_credential_sink();
    let mut form = use_signal(SignUpForm::default);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(registration) = form.write().begin() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            let result = store::register_and_login(&api, &registration).await;
            let outcome = form.write().finish(result);
            match outcome {
                SignUpOutcome::LoggedIn(credential) => credentials.send(credential),
                SignUpOutcome::AutoLoginFailed => {
                    session.write().route_to_sign_in(messages::AUTO_LOGIN_FAILED);
                }
                SignUpOutcome::Failed => {}
            }
        });
    };

    let state = form.read();
    let in_flight = state.is_in_flight();

    rsx! {
        div {
            class: "screen auth",

            h1 { class: "auth__title", "Criar Conta" }
            p { class: "auth__subtitle", "Junte-se ao Fideliza+" }

            form {
                onsubmit: handle_register,
                class: "auth__form",

                if let Some(err) = state.error() {
                    div { class: "auth__error", "{err}" }
                }

                input {
                    class: "input",
                    r#type: "text",
                    placeholder: "Nome Completo",
                    value: "{state.name}",
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
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
                    placeholder: "Crie uma senha",
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
                        "Registar"
                    }
                }
            }

            p {
                class: "auth__switch",
                "Já tem uma conta? "
                button {
                    class: "link",
                    r#type: "button",
                    onclick: move |_| {
                        session.write().show(Screen::SignIn);
                    },
                    "Faça login"
                }
            }
        }
    }
}
