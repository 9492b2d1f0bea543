use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use api::{
    AccessToken, ApiError, Credential, PointsByCompany, Redemption, Registration, RewardStatus,
    User,
};

use crate::backend::Backend;

/// A backend call as recorded by [`MemoryBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ExchangeToken { email: String },
    RegisterClient { email: String },
    CurrentUser,
    MyPoints,
    MyRewards,
    Redeem { reward_id: i64 },
}

/// Scripted replies for one endpoint. The last reply is sticky.
#[derive(Debug)]
struct Replies<T> {
    queue: VecDeque<Result<T, ApiError>>,
}

impl<T> Default for Replies<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<T: Clone> Replies<T> {
    fn next(&mut self) -> Result<T, ApiError> {
        if self.queue.len() > 1 {
            if let Some(reply) = self.queue.pop_front() {
                return reply;
            }
        }
        self.queue
            .front()
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Transport("no reply scripted".to_string())))
    }
}

#[derive(Debug, Default)]
struct Script {
    token: Replies<AccessToken>,
    register: Replies<()>,
    user: Replies<User>,
    points: Replies<Vec<PointsByCompany>>,
    rewards: Replies<Vec<RewardStatus>>,
    redeem: Replies<Redemption>,
    calls: Vec<Call>,
}

/// In-memory [`Backend`] for tests.
///
/// Each endpoint answers from a queue of scripted replies; once the queue is
/// down to its last reply, that reply repeats. Unscripted endpoints fail as if
/// the backend were unreachable.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    script: Arc<Mutex<Script>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn reply_token(&self, reply: Result<AccessToken, ApiError>) -> &Self {
        self.script().token.queue.push_back(reply);
        self
    }

    pub fn reply_register(&self, reply: Result<(), ApiError>) -> &Self {
        self.script().register.queue.push_back(reply);
        self
    }

    pub fn reply_user(&self, reply: Result<User, ApiError>) -> &Self {
        self.script().user.queue.push_back(reply);
        self
    }

    pub fn reply_points(&self, reply: Result<Vec<PointsByCompany>, ApiError>) -> &Self {
        self.script().points.queue.push_back(reply);
        self
    }

    pub fn reply_rewards(&self, reply: Result<Vec<RewardStatus>, ApiError>) -> &Self {
        self.script().rewards.queue.push_back(reply);
        self
    }

    pub fn reply_redeem(&self, reply: Result<Redemption, ApiError>) -> &Self {
        self.script().redeem.queue.push_back(reply);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.script().calls.iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.script().calls.clear();
    }
}

impl Backend for MemoryBackend {
    async fn exchange_token(&self, email: &str, _password: &str) -> Result<AccessToken, ApiError> {
        let mut script = self.script();
        script.calls.push(Call::ExchangeToken {
            email: email.to_string(),
        });
        script.token.next()
    }

    async fn register_client(&self, registration: &Registration) -> Result<(), ApiError> {
        let mut script = self.script();
        script.calls.push(Call::RegisterClient {
            email: registration.email.clone(),
        });
        script.register.next()
    }

    async fn current_user(&self, _credential: &Credential) -> Result<User, ApiError> {
        let mut script = self.script();
        script.calls.push(Call::CurrentUser);
        script.user.next()
    }

    async fn my_points(&self, _credential: &Credential) -> Result<Vec<PointsByCompany>, ApiError> {
        let mut script = self.script();
        script.calls.push(Call::MyPoints);
        script.points.next()
    }

    async fn my_rewards(&self, _credential: &Credential) -> Result<Vec<RewardStatus>, ApiError> {
        let mut script = self.script();
        script.calls.push(Call::MyRewards);
        script.rewards.next()
    }

    async fn redeem(
        &self,
        _credential: &Credential,
        reward_id: i64,
    ) -> Result<Redemption, ApiError> {
        let mut script = self.script();
        script.calls.push(Call::Redeem { reward_id });
        script.redeem.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("abc").unwrap()
    }

    #[tokio::test]
    async fn test_unscripted_endpoint_is_unreachable() {
        let backend = MemoryBackend::new();
        let err = backend.current_user(&credential()).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(backend.calls(), vec![Call::CurrentUser]);
    }

    #[tokio::test]
    async fn test_last_reply_is_sticky() {
        let backend = MemoryBackend::new();
        backend
            .reply_points(Ok(vec![]))
            .reply_points(Err(ApiError::Rejected {
                status: 500,
                detail: None,
            }));

        assert_eq!(backend.my_points(&credential()).await, Ok(vec![]));
        assert!(backend.my_points(&credential()).await.is_err());
        assert!(backend.my_points(&credential()).await.is_err());
        assert_eq!(backend.count(&Call::MyPoints), 3);
    }

    #[tokio::test]
    async fn test_records_arguments() {
        let backend = MemoryBackend::new();
        backend.reply_redeem(Ok(serde_json::json!({"ok": true})));

        let _ = backend.exchange_token("user@example.com", "secret123").await;
        let _ = backend.redeem(&credential(), 7).await;

        assert_eq!(
            backend.calls(),
            vec![
                Call::ExchangeToken {
                    email: "user@example.com".into()
                },
                Call::Redeem { reward_id: 7 },
            ]
        );
        backend.clear_calls();
        assert!(backend.calls().is_empty());
    }
}
