//! # Dashboard sync and reward redemption
//!
//! A [`Dashboard`] holds what the signed-in user sees: point balances per
//! partner company and the reward list with server-computed eligibility.
//!
//! ## Sync
//!
//! Points and rewards come from two independent endpoints. [`fetch_dashboard`]
//! issues both at once and keeps one result slot per endpoint, so a failure in
//! one never hides the other:
//!
//! - an OK slot replaces its list, in backend order
//! - a rejected slot leaves its list as it was
//! - a transport failure in either slot raises the "could not load" alert
//! - a 401 in either slot reports [`SyncOutcome::SignedOut`]
//!
//! `loading` is cleared whatever happens. Each [`begin_sync`](Dashboard::begin_sync)
//! supersedes earlier ones; a late report for an older ticket is dropped.
//!
//! ## Redemption
//!
//! `request_redeem` → confirmation prompt → `confirm_redeem` (or
//! `cancel_redeem`, which sends nothing) → `POST /rewards/redeem` →
//! `finish_redeem`. A successful redemption is followed by a full sync rather
//! than a local point decrement: the backend decides the new balance and the
//! eligibility of every other reward.

use api::{ApiError, Credential, PointsByCompany, Redemption, RewardStatus};

use crate::backend::Backend;
use crate::messages;

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn error(message: impl Into<String>) -> Self {
        Self {
            title: messages::ALERT_ERROR.to_string(),
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            title: messages::ALERT_SUCCESS.to_string(),
            message: message.into(),
        }
    }
}

/// Pending "are you sure?" prompt for one reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub reward_id: i64,
    pub reward_name: String,
    pub title: String,
    pub message: String,
}

/// How a list section should render.
#[derive(Debug, PartialEq)]
pub enum Section<'a, T> {
    Loading,
    Empty(&'static str),
    Items(&'a [T]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTicket {
    generation: u64,
}

/// Independent results of the points and rewards fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub points: Result<Vec<PointsByCompany>, ApiError>,
    pub rewards: Result<Vec<RewardStatus>, ApiError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied,
    /// A newer sync was started; nothing was touched.
    Stale,
    /// The credential was refused; the session must sign out.
    SignedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemTicket {
    pub reward_id: i64,
    pub reward_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// Redeemed; run a full sync next.
    Redeemed,
    Rejected,
    Transport,
    SignedOut,
}

/// Fetch points and rewards concurrently.
pub async fn fetch_dashboard<B: Backend>(backend: &B, credential: &Credential) -> SyncReport {
    let (points, rewards) = futures::join!(
        backend.my_points(credential),
        backend.my_rewards(credential)
    );
    SyncReport { points, rewards }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    points: Vec<PointsByCompany>,
    rewards: Vec<RewardStatus>,
    loading: bool,
    alert: Option<Alert>,
    confirmation: Option<Confirmation>,
    redeeming: bool,
    sync_generation: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            rewards: Vec::new(),
            loading: true,
            alert: None,
            confirmation: None,
            redeeming: false,
            sync_generation: 0,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PointsByCompany] {
        &self.points
    }

    pub fn rewards(&self) -> &[RewardStatus] {
        &self.rewards
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_redeeming(&self) -> bool {
        self.redeeming
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn begin_sync(&mut self) -> SyncTicket {
        self.sync_generation += 1;
        self.loading = true;
        SyncTicket {
            generation: self.sync_generation,
        }
    }

    pub fn finish_sync(&mut self, ticket: SyncTicket, report: SyncReport) -> SyncOutcome {
        if ticket.generation != self.sync_generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.sync_generation,
                "dropping stale dashboard sync"
            );
            return SyncOutcome::Stale;
        }
        self.loading = false;

        let SyncReport { points, rewards } = report;
        let refused = matches!(&points, Err(e) if e.is_unauthorized())
            || matches!(&rewards, Err(e) if e.is_unauthorized());
        if refused {
            return SyncOutcome::SignedOut;
        }

        let mut unreachable = false;
        match points {
            Ok(points) => self.points = points,
            Err(e) => unreachable |= note_sync_failure("points", &e),
        }
        match rewards {
            Ok(rewards) => self.rewards = rewards,
            Err(e) => unreachable |= note_sync_failure("rewards", &e),
        }
        if unreachable {
            self.alert = Some(Alert::error(messages::LOAD_FAILED));
        }
        SyncOutcome::Applied
    }

    /// Fetch and apply both collections.
    pub async fn sync<B: Backend>(&mut self, backend: &B, credential: &Credential) -> SyncOutcome {
        let ticket = self.begin_sync();
        let report = fetch_dashboard(backend, credential).await;
        self.finish_sync(ticket, report)
    }

    /// Open the confirmation prompt for a redeemable reward.
    pub fn request_redeem(&mut self, reward_id: i64) -> bool {
        if self.redeeming {
            return false;
        }
        let Some(reward) = self.rewards.iter().find(|r| r.id == reward_id) else {
            return false;
        };
        if !reward.redeemable {
            return false;
        }

        self.confirmation = Some(Confirmation {
            reward_id,
            reward_name: reward.name.clone(),
            title: messages::CONFIRM_REDEEM_TITLE.to_string(),
            message: messages::confirm_redeem(&reward.name),
        });
        true
    }

    pub fn cancel_redeem(&mut self) {
        self.confirmation = None;
    }

    /// Accept the open prompt. `None` if there is nothing to confirm or a
    /// redemption is already in flight.
    pub fn confirm_redeem(&mut self) -> Option<RedeemTicket> {
        if self.redeeming {
            return None;
        }
        let confirmation = self.confirmation.take()?;
        self.redeeming = true;
        Some(RedeemTicket {
            reward_id: confirmation.reward_id,
            reward_name: confirmation.reward_name,
        })
    }

    pub fn finish_redeem(
        &mut self,
        ticket: RedeemTicket,
        result: Result<Redemption, ApiError>,
    ) -> RedeemOutcome {
        self.redeeming = false;
        match result {
            Ok(_) => {
                tracing::info!(reward_id = ticket.reward_id, "reward redeemed");
                self.alert = Some(Alert::success(messages::redeemed(&ticket.reward_name)));
                RedeemOutcome::Redeemed
            }
            Err(e) if e.is_unauthorized() => RedeemOutcome::SignedOut,
            Err(e) if e.is_transport() => {
                tracing::warn!(reward_id = ticket.reward_id, error = %e, "redemption failed");
                self.alert = Some(Alert::error(messages::REDEEM_CONNECTION_FAILED));
                RedeemOutcome::Transport
            }
            Err(e) => {
                tracing::debug!(reward_id = ticket.reward_id, error = %e, "redemption rejected");
                self.alert = Some(Alert::error(e.detail().unwrap_or(messages::REDEEM_FAILED)));
                RedeemOutcome::Rejected
            }
        }
    }

    /// Confirm the open prompt, redeem, and re-sync on success.
    pub async fn redeem<B: Backend>(
        &mut self,
        backend: &B,
        credential: &Credential,
    ) -> Option<RedeemOutcome> {
        let ticket = self.confirm_redeem()?;
        let result = backend.redeem(credential, ticket.reward_id).await;
        let outcome = self.finish_redeem(ticket, result);
        if outcome == RedeemOutcome::Redeemed
            && self.sync(backend, credential).await == SyncOutcome::SignedOut
        {
            return Some(RedeemOutcome::SignedOut);
        }
        Some(outcome)
    }

    pub fn points_section(&self) -> Section<'_, PointsByCompany> {
        section(self.loading, &self.points, messages::NO_POINTS)
    }

    pub fn rewards_section(&self) -> Section<'_, RewardStatus> {
        section(self.loading, &self.rewards, messages::NO_REWARDS)
    }
}

fn section<'a, T>(loading: bool, items: &'a [T], empty: &'static str) -> Section<'a, T> {
    if loading {
        Section::Loading
    } else if items.is_empty() {
        Section::Empty(empty)
    } else {
        Section::Items(items)
    }
}

/// Log a failed slot. Returns whether it was a connectivity failure.
fn note_sync_failure(slot: &str, e: &ApiError) -> bool {
    if e.is_transport() {
        tracing::warn!(slot, error = %e, "dashboard fetch failed");
        true
    } else {
        tracing::debug!(slot, error = %e, "dashboard fetch rejected, keeping previous data");
        false
    }
}
