//! Wire models exchanged with the loyalty backend.

mod auth;
mod loyalty;
mod user;

pub use auth::{AccessToken, Credential, Registration};
pub use loyalty::{
    CompanyInfo, PointsByCompany, RedeemRequest, Redemption, RewardAction, RewardStatus,
};
pub use user::User;
