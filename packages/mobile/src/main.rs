use api::{ApiClient, ApiConfig};
use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,api=debug,store=debug,ui=debug";

fn main() {
    init_tracing();

    let config = ApiConfig::load().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration, using defaults");
        ApiConfig::default()
    });
    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        }
    };
    tracing::info!(base_url = api.base_url(), "starting Fideliza+");

    dioxus::LaunchBuilder::new().with_context(api).launch(App);
}

/// Installed before launch so Dioxus keeps it instead of its default logger.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging already initialised: {e}");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::SessionProvider {
            ui::Shell {}
        }
    }
}
