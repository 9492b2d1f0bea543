use dioxus::prelude::*;
use store::Alert;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Two-button prompt. Dismissing the overlay counts as cancel.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Cancelar".to_string())] cancel_label: String,
    #[props(default = "Confirmar".to_string())] confirm_label: String,
    on_cancel: EventHandler<()>,
    on_confirm: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            h2 { class: "modal-title", "{title}" }
            p { class: "modal-message", "{message}" }
            div {
                class: "modal-actions",
                button {
                    class: "btn btn--ghost",
                    onclick: move |_| on_cancel.call(()),
                    "{cancel_label}"
                }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}

#[component]
pub fn AlertDialog(alert: Alert, on_close: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "{alert.title}" }
            p { class: "modal-message", "{alert.message}" }
            div {
                class: "modal-actions",
                button {
                    class: "btn btn--primary",
                    onclick: move |_| on_close.call(()),
                    "OK"
                }
            }
        }
    }
}

#[component]
pub fn Spinner(#[props(default = false)] large: bool) -> Element {
    rsx! {
        div {
            class: if large { "spinner spinner--large" } else { "spinner" },
        }
    }
}
