//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod session;
pub use session::{use_api, use_credential_sink, use_session, SessionProvider};

mod shell;
pub use shell::Shell;

mod sign_in;
pub use sign_in::SignInScreen;

mod sign_up;
pub use sign_up::SignUpScreen;

mod dashboard;
pub use dashboard::DashboardScreen;

mod dialogs;
pub use dialogs::{AlertDialog, ConfirmDialog, ModalOverlay, Spinner};
