//! The seam between client state and the loyalty backend.

use std::future::Future;

use api::{
    AccessToken, ApiClient, ApiError, Credential, PointsByCompany, Redemption, Registration,
    RewardStatus, User,
};

/// Async interface over the backend endpoints the app consumes.
///
/// [`ApiClient`] is the real implementation. Tests use a scripted in-memory
/// one that records calls.
pub trait Backend {
    fn exchange_token(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AccessToken, ApiError>>;
    fn register_client(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn current_user(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<User, ApiError>>;
    fn my_points(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Vec<PointsByCompany>, ApiError>>;
    fn my_rewards(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Vec<RewardStatus>, ApiError>>;
    fn redeem(
        &self,
        credential: &Credential,
        reward_id: i64,
    ) -> impl Future<Output = Result<Redemption, ApiError>>;
}

impl Backend for ApiClient {
    async fn exchange_token(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        ApiClient::exchange_token(self, email, password).await
    }

    async fn register_client(&self, registration: &Registration) -> Result<(), ApiError> {
        ApiClient::register_client(self, registration).await
    }

    async fn current_user(&self, credential: &Credential) -> Result<User, ApiError> {
        ApiClient::current_user(self, credential).await
    }

    async fn my_points(&self, credential: &Credential) -> Result<Vec<PointsByCompany>, ApiError> {
        ApiClient::my_points(self, credential).await
    }

    async fn my_rewards(&self, credential: &Credential) -> Result<Vec<RewardStatus>, ApiError> {
        ApiClient::my_rewards(self, credential).await
    }

    async fn redeem(
        &self,
        credential: &Credential,
        reward_id: i64,
    ) -> Result<Redemption, ApiError> {
        ApiClient::redeem(self, credential, reward_id).await
    }
}
