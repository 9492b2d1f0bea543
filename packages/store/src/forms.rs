//! Sign-in and sign-up form state.
//!
//! Both forms share one shape: editable fields, an error slot that is cleared
//! on every submit attempt, and an `in_flight` flag that makes a second submit
//! a no-op until the first one has finished.

use api::{AccessToken, ApiError, Credential, Registration};

use crate::backend::Backend;
use crate::messages;

/// Credentials collected by the sign-in form, ready for `/token`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    error: Option<String>,
    in_flight: bool,
}

impl SignInForm {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validate and lock the form. `None` means nothing should be sent.
    pub fn begin(&mut self) -> Option<SignInRequest> {
        if self.in_flight {
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            self.error = Some(messages::FILL_ALL_FIELDS.to_string());
            return None;
        }

        self.error = None;
        self.in_flight = true;
        Some(SignInRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    /// Unlock the form and turn the `/token` reply into a credential.
    pub fn finish(&mut self, result: Result<AccessToken, ApiError>) -> Option<Credential> {
        self.in_flight = false;
        match result.map(|token| token.credential()) {
            Ok(Some(credential)) => Some(credential),
            Ok(None) => {
                tracing::warn!("token endpoint returned an empty access token");
                self.error = Some(messages::SIGN_IN_FAILED.to_string());
                None
            }
            Err(e) => {
                self.error = Some(error_message(&e, messages::SIGN_IN_FAILED));
                None
            }
        }
    }

    pub async fn submit<B: Backend>(&mut self, backend: &B) -> Option<Credential> {
        let request = self.begin()?;
        let result = backend.exchange_token(&request.email, &request.password).await;
        self.finish(result)
    }
}

/// Result of the register-then-login round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpResult {
    RegistrationFailed(ApiError),
    Registered(Result<AccessToken, ApiError>),
}

/// What the app should do after a sign-up attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Registered and logged in; hand the credential to the session.
    LoggedIn(Credential),
    /// Registered, but the follow-up `/token` call failed; go to sign-in.
    AutoLoginFailed,
    /// Stay on sign-up with the error shown.
    Failed,
}

/// Register a client account, then log in with the same credentials.
pub async fn register_and_login<B: Backend>(
    backend: &B,
    registration: &Registration,
) -> SignUpResult {
    if let Err(e) = backend.register_client(registration).await {
        return SignUpResult::RegistrationFailed(e);
    }
    tracing::info!(email = %registration.email, "registered client account");
    let login = backend
        .exchange_token(&registration.email, &registration.password)
        .await;
    SignUpResult::Registered(login)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    error: Option<String>,
    in_flight: bool,
}

impl SignUpForm {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn begin(&mut self) -> Option<Registration> {
        if self.in_flight {
            return None;
        }
        let email = self.email.trim();
        if self.name.trim().is_empty() || email.is_empty() || self.password.is_empty() {
            self.error = Some(messages::FILL_ALL_FIELDS.to_string());
            return None;
        }

        self.error = None;
        self.in_flight = true;
        Some(Registration {
            name: self.name.clone(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn finish(&mut self, result: SignUpResult) -> SignUpOutcome {
        self.in_flight = false;
        match result {
            SignUpResult::RegistrationFailed(e) => {
                self.error = Some(error_message(&e, messages::SIGN_UP_FAILED));
                SignUpOutcome::Failed
            }
            SignUpResult::Registered(login) => {
                match login {
                    Ok(token) => match token.credential() {
                        Some(credential) => return SignUpOutcome::LoggedIn(credential),
                        None => tracing::warn!("token endpoint returned an empty access token"),
                    },
                    Err(e) => tracing::warn!(error = %e, "auto-login after registration failed"),
                }
                self.error = Some(messages::AUTO_LOGIN_FAILED.to_string());
                SignUpOutcome::AutoLoginFailed
            }
        }
    }

    pub async fn submit<B: Backend>(&mut self, backend: &B) -> Option<SignUpOutcome> {
        let registration = self.begin()?;
        let result = register_and_login(backend, &registration).await;
        Some(self.finish(result))
    }
}

/// Message for a failed credential call: connectivity, backend detail, or fallback.
fn error_message(e: &ApiError, fallback: &str) -> String {
    if e.is_transport() {
        tracing::warn!(error = %e, "backend unreachable");
        return messages::CONNECTION_FAILED.to_string();
    }
    e.detail().unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Call, MemoryBackend};

    fn token(value: &str) -> AccessToken {
        AccessToken {
            access_token: value.to_string(),
            token_type: Some("bearer".into()),
        }
    }

    fn rejected(detail: Option<&str>) -> ApiError {
        ApiError::Rejected {
            status: 400,
            detail: detail.map(str::to_string),
        }
    }

    fn filled_sign_in() -> SignInForm {
        SignInForm {
            email: "user@example.com".into(),
            password: "secret123".into(),
            ..SignInForm::default()
        }
    }

    fn filled_sign_up() -> SignUpForm {
        SignUpForm {
            name: "Ana".into(),
            email: "user@example.com".into(),
            password: "secret123".into(),
            ..SignUpForm::default()
        }
    }

    #[tokio::test]
    async fn test_sign_in_empty_fields_never_hit_network() {
        let backend = MemoryBackend::new();
        let cases = [
            ("", "secret123"),
            ("user@example.com", ""),
            ("", ""),
            ("   ", "x"),
        ];
        for (email, password) in cases {
            let mut form = SignInForm {
                email: email.into(),
                password: password.into(),
                ..SignInForm::default()
            };
            assert_eq!(form.submit(&backend).await, None);
            assert_eq!(form.error(), Some(messages::FILL_ALL_FIELDS));
            assert!(!form.is_in_flight());
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let backend = MemoryBackend::new();
        backend.reply_token(Ok(token("abc")));

        let mut form = filled_sign_in();
        let credential = form.submit(&backend).await;
        assert_eq!(credential, Credential::new("abc"));
        assert_eq!(form.error(), None);
        assert_eq!(
            backend.calls(),
            vec![Call::ExchangeToken {
                email: "user@example.com".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_sign_in_rejection_messages() {
        let backend = MemoryBackend::new();
        backend
            .reply_token(Err(rejected(Some("Incorrect email or password"))))
            .reply_token(Err(rejected(None)));

        let mut form = filled_sign_in();
        assert_eq!(form.submit(&backend).await, None);
        assert_eq!(form.error(), Some("Incorrect email or password"));

        assert_eq!(form.submit(&backend).await, None);
        assert_eq!(form.error(), Some(messages::SIGN_IN_FAILED));
    }

    #[tokio::test]
    async fn test_sign_in_transport_message_is_distinct() {
        let backend = MemoryBackend::new();
        backend.reply_token(Err(ApiError::Transport("refused".into())));

        let mut form = filled_sign_in();
        assert_eq!(form.submit(&backend).await, None);
        assert_eq!(form.error(), Some(messages::CONNECTION_FAILED));
        assert_ne!(messages::CONNECTION_FAILED, messages::SIGN_IN_FAILED);
    }

    #[test]
    fn test_sign_in_guard_blocks_second_submit() {
        let mut form = filled_sign_in();
        assert!(form.begin().is_some());
        assert!(form.is_in_flight());
        assert!(form.begin().is_none());

        form.finish(Err(rejected(None)));
        assert!(!form.is_in_flight());
        assert!(form.begin().is_some());
    }

    #[test]
    fn test_error_cleared_on_new_attempt() {
        let mut form = SignInForm::default();
        form.begin();
        assert!(form.error().is_some());

        form.email = "user@example.com".into();
        form.password = "secret123".into();
        form.begin();
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_sign_in_empty_token_is_a_failure() {
        let mut form = filled_sign_in();
        form.begin();
        assert_eq!(form.finish(Ok(token(""))), None);
        assert_eq!(form.error(), Some(messages::SIGN_IN_FAILED));
    }

    #[tokio::test]
    async fn test_sign_up_requires_all_fields() {
        let backend = MemoryBackend::new();
        let mut form = SignUpForm {
            name: String::new(),
            ..filled_sign_up()
        };
        assert_eq!(form.submit(&backend).await, None);
        assert_eq!(form.error(), Some(messages::FILL_ALL_FIELDS));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_logs_in_with_same_credentials() {
        let backend = MemoryBackend::new();
        backend.reply_register(Ok(())).reply_token(Ok(token("fresh")));

        let mut form = filled_sign_up();
        let outcome = form.submit(&backend).await;
        assert_eq!(
            outcome,
            Some(SignUpOutcome::LoggedIn(Credential::new("fresh").unwrap()))
        );
        assert_eq!(
            backend.calls(),
            vec![
                Call::RegisterClient {
                    email: "user@example.com".into()
                },
                Call::ExchangeToken {
                    email: "user@example.com".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_sign_up_auto_login_failure() {
        for login in [Err(rejected(Some("nope"))), Err(ApiError::Transport("refused".into()))] {
            let backend = MemoryBackend::new();
            backend.reply_register(Ok(())).reply_token(login);

            let mut form = filled_sign_up();
            assert_eq!(form.submit(&backend).await, Some(SignUpOutcome::AutoLoginFailed));
            assert_eq!(form.error(), Some(messages::AUTO_LOGIN_FAILED));
        }
    }

    #[tokio::test]
    async fn test_sign_up_registration_rejected() {
        let backend = MemoryBackend::new();
        backend.reply_register(Err(rejected(Some("Email already registered"))));

        let mut form = filled_sign_up();
        assert_eq!(form.submit(&backend).await, Some(SignUpOutcome::Failed));
        assert_eq!(form.error(), Some("Email already registered"));
        // No login attempt after a failed registration.
        assert_eq!(backend.calls().len(), 1);
        assert!(!form.is_in_flight());
    }

    #[tokio::test]
    async fn test_sign_up_registration_fallback_and_transport() {
        let backend = MemoryBackend::new();
        backend
            .reply_register(Err(rejected(None)))
            .reply_register(Err(ApiError::Transport("refused".into())));

        let mut form = filled_sign_up();
        form.submit(&backend).await;
        assert_eq!(form.error(), Some(messages::SIGN_UP_FAILED));
        form.submit(&backend).await;
        assert_eq!(form.error(), Some(messages::CONNECTION_FAILED));
    }
}
