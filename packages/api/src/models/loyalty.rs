//! Points, rewards and redemption payloads.

use serde::{Deserialize, Serialize};

/// Summary of a partner company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyInfo {
    pub id: i64,
    pub name: String,
}

/// Points a user has accumulated with one partner company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointsByCompany {
    pub total_points: i64,
    pub company: CompanyInfo,
}

/// A reward together with the server-computed eligibility of the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardStatus {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub points_required: i64,
    pub company_id: i64,
    pub redeemable: bool,
    /// Point shortfall when not redeemable.
    #[serde(default)]
    pub points_to_redeem: i64,
}

/// What a reward row offers the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardAction {
    Redeem,
    Shortfall(i64),
}

impl RewardStatus {
    /// Project the backend's eligibility flag. Never recomputed from balances.
    pub fn action(&self) -> RewardAction {
        if self.redeemable {
            RewardAction::Redeem
        } else {
            RewardAction::Shortfall(self.points_to_redeem)
        }
    }
}

/// JSON body of `POST /rewards/redeem`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedeemRequest {
    pub reward_id: i64,
}

/// Success body of a redemption. The client only acknowledges it.
pub type Redemption = serde_json::Value;
