//! # API crate - typed client for the Fideliza+ loyalty backend
//!
//! Every screen of the app talks to a pre-existing REST backend. This crate owns
//! the wire side of that conversation and nothing else: no view state lives here.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], one method per backend endpoint |
//! | [`config`] | [`ApiConfig`], the backend origin and request timeout |
//! | [`error`] | [`ApiError`] and [`ConfigError`] |
//! | [`models`] | Wire models (`User`, `PointsByCompany`, `RewardStatus`, ...) and the [`Credential`] newtype |
//!
//! ## Endpoints
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | POST | `/token` | none, form-encoded |
//! | POST | `/register/client/` | none, JSON |
//! | GET | `/users/me/` | bearer |
//! | GET | `/points/my-points` | bearer |
//! | GET | `/rewards/my-status` | bearer |
//! | POST | `/rewards/redeem` | bearer, JSON |

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError};
pub use models::{
    AccessToken, CompanyInfo, Credential, PointsByCompany, RedeemRequest, Redemption,
    Registration, RewardAction, RewardStatus, User,
};
