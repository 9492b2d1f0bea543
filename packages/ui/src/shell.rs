use dioxus::prelude::*;
use store::Frame;

use crate::dashboard::DashboardScreen;
use crate::dialogs::Spinner;
use crate::session::use_session;
use crate::sign_in::SignInScreen;
use crate::sign_up::SignUpScreen;

/// Picks the active screen from the session.
#[component]
pub fn Shell() -> Element {
    let mut session = use_session();
    let frame = session.read().frame();

    match frame {
        Frame::Loading => rsx! {
            div {
                class: "screen screen--center",
                Spinner { large: true }
            }
        },
        Frame::SignIn { notice } => rsx! {
            SignInScreen { notice }
        },
        Frame::SignUp => rsx! {
            SignUpScreen {}
        },
        Frame::Dashboard { user, credential } => {
            // A new key per session so nothing from a previous login survives.
            let generation = session.read().generation();
            rsx! {
                DashboardScreen { key: "{generation}", user, credential }
            }
        }
        Frame::Invalid => {
            spawn(async move {
                session.write().recover();
            });
            rsx! {}
        }
    }
}
