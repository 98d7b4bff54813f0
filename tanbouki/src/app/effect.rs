use super::Action;
use tanbouki_core::{
    auth::{register, Client},
    Attempt,
};

/// Connections to external services that effects use. We keep these around
/// to share connections for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,

    /// Where the authentication API lives
    client: Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new(http: reqwest::Client, client: Client) -> Self {
        Self { http, client }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Send a login attempt to the server
    LogIn(Attempt),

    /// Create an account on the server
    Register(register::Req),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Action {
        match self {
            Self::LogIn(attempt) => {
                tracing::info!(attempt = %attempt.id, intent = %attempt.intent, "logging in");

                let resp = conn.client.login(&conn.http, &attempt.request).await;

                Action::LoginFinished(attempt.id, resp)
            }

            Self::Register(req) => {
                tracing::info!(email = %req.email, "registering");

                let resp = conn.client.register(&conn.http, &req).await;

                Action::Registered(resp)
            }
        }
    }
}
