use serde::{Deserialize, Serialize};
use std::fmt;

/// The request to log into the server.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Req {
    /// Email to use for login.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,
}

impl fmt::Debug for Req {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Req")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// Result of logging in. The server owns the shape of this, so we keep it
/// as raw JSON and only offer lookups for the fields we know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthResult(pub serde_json::Value);

impl AuthResult {
    /// The bearer token, if the server sent one.
    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(serde_json::Value::as_str)
    }

    /// What kind of token `access_token` is (usually `bearer`.)
    pub fn token_type(&self) -> Option<&str> {
        self.0.get("token_type").and_then(serde_json::Value::as_str)
    }
}

/// Where the login endpoint lives.
pub const PATH: &str = "/auth/login";
