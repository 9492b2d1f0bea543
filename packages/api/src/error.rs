//! Error types for backend calls and configuration loading.

use serde::Deserialize;

/// Failure of a single backend call.
///
/// The variants line up with how the app reports problems to the user: a
/// `Rejected` call carries the backend's own explanation, the other two are
/// shown as a connectivity problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    #[error("connection error: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The backend-provided `detail` message, if the call was rejected with one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether the backend refused the bearer credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }

    /// Whether no usable response came back at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Decode(_))
    }

    /// Build a `Rejected` error from a non-2xx status and its raw body.
    ///
    /// Only a string `detail` is kept. FastAPI validation errors put a list
    /// there, which is not something to show a user verbatim.
    pub(crate) fn rejected(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<serde_json::Value>,
        }

        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            });

        ApiError::Rejected { status, detail }
    }
}

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid backend url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_keeps_string_detail() {
        let err = ApiError::rejected(400, r#"{"detail":"insufficient points"}"#);
        assert_eq!(err.detail(), Some("insufficient points"));
        assert!(!err.is_transport());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_rejected_drops_validation_list() {
        let err = ApiError::rejected(
            422,
            r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
        );
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_rejected_with_non_json_body() {
        let err = ApiError::rejected(502, "<html>Bad Gateway</html>");
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 502,
                detail: None
            }
        );
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::rejected(401, r#"{"detail":"Could not validate credentials"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some("Could not validate credentials"));
    }

    #[test]
    fn test_transport_kinds() {
        assert!(ApiError::Transport("refused".into()).is_transport());
        assert!(ApiError::Decode("eof".into()).is_transport());
        assert_eq!(ApiError::Transport("refused".into()).detail(), None);
    }
}
