//! Dashboard screen: greeting, loyalty QR code, points and rewards.

use api::{ApiClient, Credential, PointsByCompany, RewardAction, RewardStatus, User};
use dioxus::prelude::*;
use store::{messages, Dashboard, RedeemOutcome, Section, Session, SyncOutcome};

use crate::dialogs::{AlertDialog, ConfirmDialog, Spinner};
use crate::session::{use_api, use_session};

/// Fetch points and rewards into `dashboard`, signing the session out on a 401.
async fn sync_dashboard(
    mut dashboard: Signal<Dashboard>,
    mut session: Signal<Session>,
    generation: u64,
    api: ApiClient,
    credential: Credential,
) {
    let ticket = dashboard.write().begin_sync();
    let report = store::fetch_dashboard(&api, &credential).await;
    if dashboard.write().finish_sync(ticket, report) == SyncOutcome::SignedOut {
        session.write().expire(generation);
    }
}

#[component]
pub fn DashboardScreen(user: User, credential: Credential) -> Element {
    let mut session = use_session();
    let api = use_api();
    let mut dashboard = use_signal(Dashboard::new);
    let generation = use_hook(|| session.peek().generation());

    // Initial sync, once per mount.
    use_hook({
        let api = api.clone();
        let credential = credential.clone();
        move || {
            spawn(sync_dashboard(dashboard, session, generation, api, credential));
        }
    });

    let handle_confirm = {
        let credential = credential.clone();
        move |_: ()| {
            let Some(ticket) = dashboard.write().confirm_redeem() else {
                return;
            };
            let api = api.clone();
            let credential = credential.clone();
            spawn(async move {
                let result = api.redeem(&credential, ticket.reward_id).await;
                let outcome = dashboard.write().finish_redeem(ticket, result);
                match outcome {
                    RedeemOutcome::Redeemed => {
                        sync_dashboard(dashboard, session, generation, api, credential).await;
                    }
                    RedeemOutcome::SignedOut => {
                        session.write().expire(generation);
                    }
                    RedeemOutcome::Rejected | RedeemOutcome::Transport => {}
                }
            });
        }
    };

    let greeting = user.greeting();
    let state = dashboard.read();
    let alert = state.alert().cloned();
    let confirmation = state.confirmation().cloned();

    rsx! {
        div {
            class: "screen dashboard",

            div {
                class: "dashboard__header",
                div {
                    h1 { class: "dashboard__greeting", "{greeting}" }
                    p { class: "dashboard__email", "{user.email}" }
                }
                button {
                    class: "btn btn--logout",
                    onclick: move |_| session.write().sign_out(),
                    "Sair"
                }
            }

            QrCard { user: user.clone() }

            section {
                class: "dashboard__section",
                h2 { class: "dashboard__section-title", "Meus Pontos" }
                {points_list(state.points_section())}
            }

            section {
                class: "dashboard__section",
                h2 { class: "dashboard__section-title", "Prémios Disponíveis" }
                {rewards_list(state.rewards_section(), dashboard)}
            }

            if let Some(confirmation) = confirmation {
                ConfirmDialog {
                    title: confirmation.title,
                    message: confirmation.message,
                    on_cancel: move |_| dashboard.write().cancel_redeem(),
                    on_confirm: handle_confirm,
                }
            }

            if let Some(alert) = alert {
                AlertDialog {
                    alert,
                    on_close: move |_| dashboard.write().dismiss_alert(),
                }
            }
        }
    }
}

#[component]
fn QrCard(user: User) -> Element {
    rsx! {
        div {
            class: "qr-card",
            h2 { class: "qr-card__title", "Seu QR Code de Fidelidade" }
            div {
                class: "qr-card__code",
                {match user.qr_code_data_uri() {
                    Some(src) => rsx! {
                        img { src, width: "220", height: "220", alt: "QR Code" }
                    },
                    None => rsx! {
                        p { {messages::QR_UNAVAILABLE} }
                    },
                }}
            }
            p {
                class: "qr-card__subtitle",
                "Apresente este código nas lojas parceiras para pontuar."
            }
        }
    }
}

fn points_list(section: Section<'_, PointsByCompany>) -> Element {
    match section {
        Section::Loading => rsx! { Spinner {} },
        Section::Empty(message) => rsx! { p { class: "empty", "{message}" } },
        Section::Items(points) => rsx! {
            for entry in points.iter() {
                div {
                    key: "{entry.company.id}",
                    class: "card",
                    h3 { class: "card__title", "{entry.company.name}" }
                    p { class: "card__points", "{entry.total_points} Pontos" }
                }
            }
        },
    }
}

fn rewards_list(section: Section<'_, RewardStatus>, mut dashboard: Signal<Dashboard>) -> Element {
    match section {
        Section::Loading => rsx! { Spinner {} },
        Section::Empty(message) => rsx! { p { class: "empty", "{message}" } },
        Section::Items(rewards) => rsx! {
            for reward in rewards.iter() {
                RewardCard {
                    key: "{reward.id}",
                    reward: reward.clone(),
                    on_redeem: move |id: i64| {
                        dashboard.write().request_redeem(id);
                    },
                }
            }
        },
    }
}

/// One reward row. Ineligible rewards are de-emphasised and show the shortfall
/// instead of a redeem button.
#[component]
fn RewardCard(reward: RewardStatus, on_redeem: EventHandler<i64>) -> Element {
    let action = reward.action();
    let id = reward.id;

    rsx! {
        div {
            class: if action == RewardAction::Redeem { "card" } else { "card card--disabled" },
            h3 { class: "card__title", "{reward.name}" }
            if let Some(description) = &reward.description {
                p { class: "card__subtitle", "{description}" }
            }
            div {
                class: "card__footer",
                span { class: "card__required", "{reward.points_required} Pontos" }
                {match action {
                    RewardAction::Redeem => rsx! {
                        button {
                            class: "btn btn--redeem",
                            onclick: move |_| on_redeem.call(id),
                            "Resgatar"
                        }
                    },
                    RewardAction::Shortfall(points) => {
                        let shortfall = messages::shortfall(points);
                        rsx! {
                            span { class: "card__shortfall", "{shortfall}" }
                        }
                    }
                }}
            }
        }
    }
}
