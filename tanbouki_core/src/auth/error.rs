use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the server turned us down without saying why.
pub const REJECTED_FALLBACK: &str = "login failed";

/// Shown when we never got a usable answer from the server.
pub const TRANSPORT_FALLBACK: &str = "could not reach server";

/// Errors that can happen while processing requests
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The server answered, but with a non-success status.
    #[error("server rejected the request ({status}): {}", .detail.as_deref().unwrap_or(REJECTED_FALLBACK))]
    Rejected {
        /// What the server returned
        status: StatusCode,

        /// The `detail` field of the response body, if there was one
        detail: Option<String>,
    },

    /// We couldn't complete the request: the server was unreachable, the
    /// request timed out, or a success body didn't decode.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// The message to show a person looking at the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            Self::Rejected { .. } => REJECTED_FALLBACK.to_string(),
            Self::UrlParse(_) | Self::Transport(_) => TRANSPORT_FALLBACK.to_string(),
        }
    }
}

/// The body the server sends along with a failure status. Everything is
/// optional since we can't count on the server to send anything in particular.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorResp {
    /// Human-readable explanation
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResp {
    /// Pull a usable message out of the raw response body. Non-JSON bodies
    /// and non-string `detail`s (e.g. validation error lists) give `None`.
    pub fn detail_from_body(body: &[u8]) -> Option<String> {
        let resp: ErrorResp = serde_json::from_slice(body).ok()?;

        match resp.detail? {
            serde_json::Value::String(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_detail_from_json_body() {
        assert_eq!(
            ErrorResp::detail_from_body(br#"{"detail":"invalid credentials"}"#),
            Some("invalid credentials".to_string())
        );
    }

    #[test]
    fn test_detail_missing() {
        assert_eq!(ErrorResp::detail_from_body(br#"{"error":"nope"}"#), None);
    }

    #[test]
    fn test_detail_not_a_string() {
        assert_eq!(
            ErrorResp::detail_from_body(br#"{"detail":[{"loc":["body"],"msg":"field required"}]}"#),
            None
        );
    }

    #[test]
    fn test_detail_unparsable_body() {
        assert_eq!(ErrorResp::detail_from_body(b"<html>oops</html>"), None);
    }

    #[test]
    fn test_user_message_rejected_with_detail() {
        let err = Error::Rejected {
            status: StatusCode::UNAUTHORIZED,
            detail: Some("invalid credentials".to_string()),
        };

        assert_eq!(err.user_message(), "invalid credentials");
    }

    #[test]
    fn test_user_message_rejected_without_detail() {
        let err = Error::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };

        assert_eq!(err.user_message(), REJECTED_FALLBACK);
    }

    #[test]
    fn test_user_message_bad_url() {
        let err = Error::from(url::Url::parse("not a url").unwrap_err());

        assert_eq!(err.user_message(), TRANSPORT_FALLBACK);
    }
}
