//! Session context and hooks for the UI.

use api::{ApiClient, Credential};
use dioxus::prelude::*;
use futures::StreamExt;
use store::Session;

/// Get the session state.
/// Returns a signal that updates on sign-in, sign-out and screen changes.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the backend client provided by the app root.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Handle for passing a freshly issued credential to the [`SessionProvider`].
///
/// The identity fetch runs in the provider's scope, so it survives the
/// sign-in or sign-up screen unmounting when the loading indicator takes over.
pub fn use_credential_sink() -> Coroutine<Credential> {
    use_coroutine_handle::<Credential>()
}

/// Provider component that owns the session.
/// Expects an [`ApiClient`] in context; wrap the app's screens with it.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_signal(Session::new);
    let api = use_api();

    let _identity = use_coroutine(move |mut rx: UnboundedReceiver<Credential>| {
        let api = api.clone();
        async move {
            while let Some(credential) = rx.next().await {
                let api = api.clone();
                let mut session = session;
                spawn(async move {
                    let ticket = session.write().begin_identity(credential);
                    tracing::debug!(generation = ticket.generation(), "resolving identity");
                    let result = api.current_user(ticket.credential()).await;
                    session.write().finish_identity(ticket, result);
                });
            }
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}
