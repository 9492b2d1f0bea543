//! HTTP client for the loyalty backend.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    AccessToken, Credential, PointsByCompany, RedeemRequest, Redemption, Registration,
    RewardStatus, User,
};

/// Loyalty backend client. Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange email and password for an access token (`POST /token`).
    pub async fn exchange_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessToken, ApiError> {
        let request = self
            .request(Method::POST, "/token", None)
            .form(&[("username", email), ("password", password)]);
        self.send_json(request).await
    }

    /// Create a client account (`POST /register/client/`).
    pub async fn register_client(&self, registration: &Registration) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, "/register/client/", None)
            .json(registration);
        self.send(request).await?;
        Ok(())
    }

    /// Identity behind a credential (`GET /users/me/`).
    pub async fn current_user(&self, credential: &Credential) -> Result<User, ApiError> {
        let request = self.request(Method::GET, "/users/me/", Some(credential));
        self.send_json(request).await
    }

    /// Point balances per partner company (`GET /points/my-points`).
    pub async fn my_points(
        &self,
        credential: &Credential,
    ) -> Result<Vec<PointsByCompany>, ApiError> {
        let request = self.request(Method::GET, "/points/my-points", Some(credential));
        self.send_json(request).await
    }

    /// Rewards with server-computed eligibility (`GET /rewards/my-status`).
    pub async fn my_rewards(
        &self,
        credential: &Credential,
    ) -> Result<Vec<RewardStatus>, ApiError> {
        let request = self.request(Method::GET, "/rewards/my-status", Some(credential));
        self.send_json(request).await
    }

    /// Redeem a reward (`POST /rewards/redeem`).
    pub async fn redeem(
        &self,
        credential: &Credential,
        reward_id: i64,
    ) -> Result<Redemption, ApiError> {
        let request = self
            .request(Method::POST, "/rewards/redeem", Some(credential))
            .json(&RedeemRequest { reward_id });
        self.send_json(request).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.request(method, url);
        match credential {
            Some(credential) => request.bearer_auth(credential.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "backend unreachable");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::rejected(status.as_u16(), &body);
        tracing::debug!(%method, %path, error = %err, "backend rejected request");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let path = response.url().path().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%path, error = %e, "unexpected response body");
            ApiError::Decode(e.to_string())
        })
    }
}
