use serde::{Deserialize, Serialize};

/// The request to register a new account. Same shape as logging in.
pub type Req = super::login::Req;

/// Result of registering a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// Confirmation from the server.
    pub message: String,
}

/// Where the register endpoint lives.
pub const PATH: &str = "/auth/register";
