//! Credential exchange payloads and the bearer [`Credential`] itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer token proving an authenticated session.
///
/// Only ever held in memory. `Debug` is redacted so the token cannot leak
/// into logs through a stray `{:?}`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, refusing empty or whitespace-only strings.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Successful response of `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl AccessToken {
    pub fn credential(&self) -> Option<Credential> {
        Credential::new(self.access_token.clone())
    }
}

/// JSON body of `POST /register/client/`.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_rejects_empty() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert_eq!(Credential::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("super-secret").unwrap();
        assert!(!format!("{cred:?}").contains("super-secret"));
    }

    #[test]
    fn test_access_token_without_type() {
        let token: AccessToken = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.credential(), Credential::new("abc"));
        assert!(token.token_type.is_none());
    }

    #[test]
    fn test_registration_debug_hides_password() {
        let reg = Registration {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret123".into(),
        };
        assert!(!format!("{reg:?}").contains("secret123"));
    }
}
