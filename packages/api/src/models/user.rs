//! # The signed-in user
//!
//! [`User`] is the body of `GET /users/me/`. The client never edits it; it is
//! fetched fresh every time a credential is established and thrown away
//! together with that credential.
//!
//! Besides identity fields the record may carry `qr_code_base64`, a PNG that the
//! backend renders for in-store scanning. [`User::qr_code_data_uri`] turns it
//! into something an `img` element can show, or `None` when the payload is
//! missing or not valid base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// User record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Role tag (`"client"`, `"company"`, ...).
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub qr_code_base64: Option<String>,
}

impl User {
    /// Header greeting shown on the dashboard.
    pub fn greeting(&self) -> String {
        format!("Olá, {}!", self.name)
    }

    /// `data:` URI for the loyalty QR code, if the backend sent a usable one.
    pub fn qr_code_data_uri(&self) -> Option<String> {
        let payload = self.qr_code_base64.as_deref()?.trim();
        if payload.is_empty() || STANDARD.decode(payload).is_err() {
            return None;
        }
        Some(format!("data:image/png;base64,{payload}"))
    }
}
