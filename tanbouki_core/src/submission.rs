use crate::auth::login::AuthResult;
use std::fmt;

/// Where the most recent login attempt is in its lifecycle. There's no
/// terminal state: after `Succeeded` or `Failed` the form can be submitted
/// again, which moves back to `InFlight`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    /// Nobody has pressed the button yet
    #[default]
    Idle,

    /// We're waiting on the server
    InFlight,

    /// The server accepted the credentials
    Succeeded(AuthResult),

    /// Something went wrong. The message is meant for people.
    Failed(String),
}

impl SubmissionState {
    /// Should the form show a loading indicator?
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// The message to show under the form, if the last attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Which button the person used to submit. Both do the same thing right
/// now; we keep them apart so the guest flow can diverge without touching
/// every caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginIntent {
    /// The regular login button
    #[default]
    Primary,

    /// The "log in as guest" button
    Guest,
}

impl fmt::Display for LoginIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Guest => f.write_str("guest"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_in_flight_is_loading() {
        assert!(!SubmissionState::Idle.is_loading());
        assert!(SubmissionState::InFlight.is_loading());
        assert!(!SubmissionState::Succeeded(AuthResult(json!({}))).is_loading());
        assert!(!SubmissionState::Failed("nope".to_string()).is_loading());
    }

    #[test]
    fn test_only_failed_has_error_message() {
        assert_eq!(SubmissionState::Idle.error_message(), None);
        assert_eq!(SubmissionState::InFlight.error_message(), None);
        assert_eq!(
            SubmissionState::Succeeded(AuthResult(json!({}))).error_message(),
            None
        );
        assert_eq!(
            SubmissionState::Failed("nope".to_string()).error_message(),
            Some("nope")
        );
    }
}
