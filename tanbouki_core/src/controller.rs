use crate::auth::{
    self,
    error::TRANSPORT_FALLBACK,
    login::{self, AuthResult},
};
use crate::credentials::Credentials;
use crate::submission::{LoginIntent, SubmissionState};
use std::fmt;

/// Identifies one login attempt. Later attempts get larger IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A login attempt that has been started but not finished. Run the request
/// somewhere and hand the outcome back to `LoginController::finish`.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// Which attempt this is
    pub id: AttemptId,

    /// Which button started it
    pub intent: LoginIntent,

    /// What to send to the server
    pub request: login::Req,
}

/// What observers get told about on every change
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The current form values
    pub credentials: Credentials,

    /// The current submission state
    pub state: SubmissionState,
}

type Observer = Box<dyn FnMut(&Snapshot) + Send>;

/// Owns the login form's values and the status of the last submission.
///
/// Only one attempt can be in flight at a time: submitting while we're
/// still waiting on the server does nothing. On top of that, outcomes are
/// matched against the latest `AttemptId`, so an answer for an older
/// attempt can never overwrite a newer one.
#[derive(Default)]
pub struct LoginController {
    /// What's in the form
    credentials: Credentials,

    /// How the last attempt went
    state: SubmissionState,

    /// The most recently started attempt
    latest: Option<AttemptId>,

    /// Rendering surfaces that want to hear about changes
    observers: Vec<Observer>,
}

impl LoginController {
    /// Create a controller with empty credentials and nothing submitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run after every change to the credentials or
    /// the submission state.
    pub fn subscribe(&mut self, observer: impl FnMut(&Snapshot) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The current form values
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// How the last attempt went
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Are we waiting on the server?
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Why the last attempt failed, if it did
    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    /// Update the email field. Setting the value it already has is a no-op.
    pub fn set_email(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.credentials.email != value {
            self.credentials.email = value;
            self.notify();
        }
    }

    /// Update the password field. Setting the value it already has is a
    /// no-op.
    pub fn set_password(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.credentials.password != value {
            self.credentials.password = value;
            self.notify();
        }
    }

    /// Start a login attempt: move to `InFlight` and return what needs to be
    /// sent. Returns `None` if an attempt is already in flight.
    pub fn begin_submit(&mut self, intent: LoginIntent) -> Option<Attempt> {
        if self.state.is_loading() {
            tracing::debug!(%intent, "ignoring submit while another attempt is in flight");
            return None;
        }

        let id = AttemptId(self.latest.map_or(1, |AttemptId(prev)| prev + 1));
        self.latest = Some(id);
        self.state = SubmissionState::InFlight;
        self.notify();

        tracing::info!(attempt = %id, %intent, email = %self.credentials.email, "submitting login");

        Some(Attempt {
            id,
            intent,
            request: self.credentials.to_login_req(),
        })
    }

    /// Finish a login attempt with whatever the server said. Returns `false`
    /// (and changes nothing) if `id` isn't the attempt we're waiting on.
    pub fn finish(&mut self, id: AttemptId, outcome: auth::error::Result<AuthResult>) -> bool {
        let next = match outcome {
            Ok(result) => {
                tracing::info!(attempt = %id, "login succeeded");
                SubmissionState::Succeeded(result)
            }
            Err(err) => {
                tracing::warn!(attempt = %id, ?err, "login failed");
                SubmissionState::Failed(err.user_message())
            }
        };

        self.settle(id, next)
    }

    /// Run a whole login attempt against `client` with the current
    /// credentials. Every outcome ends up in `state()`; nothing is returned
    /// as an error. Returns the attempt's ID, or `None` if an attempt was
    /// already in flight and we didn't send anything.
    ///
    /// If this future is dropped before the server answers, the attempt is
    /// settled as a transport failure so the form doesn't stay stuck in
    /// `InFlight`.
    pub async fn submit(
        &mut self,
        http: &reqwest::Client,
        client: &auth::Client,
        intent: LoginIntent,
    ) -> Option<AttemptId> {
        let attempt = self.begin_submit(intent)?;

        let guard = SettleOnDrop {
            controller: self,
            id: attempt.id,
        };

        let outcome = client.login(http, &attempt.request).await;
        guard.controller.finish(attempt.id, outcome);

        Some(attempt.id)
    }

    /// Move from `InFlight` to `next`, but only for the latest attempt.
    fn settle(&mut self, id: AttemptId, next: SubmissionState) -> bool {
        if self.latest != Some(id) || !self.state.is_loading() {
            tracing::debug!(attempt = %id, latest = ?self.latest, "ignoring outcome for stale attempt");
            return false;
        }

        self.state = next;
        self.notify();

        true
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = Snapshot {
            credentials: self.credentials.clone(),
            state: self.state.clone(),
        };

        for observer in &mut self.observers {
            observer(&snapshot);
        }
    }
}

impl fmt::Debug for LoginController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginController")
            .field("credentials", &self.credentials)
            .field("state", &self.state)
            .field("latest", &self.latest)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Clears `InFlight` if `submit` is abandoned partway through.
struct SettleOnDrop<'a> {
    controller: &'a mut LoginController,
    id: AttemptId,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if self.controller.latest == Some(self.id) && self.controller.is_loading() {
            tracing::warn!(attempt = %self.id, "login attempt abandoned before the server answered");
            self.controller
                .settle(self.id, SubmissionState::Failed(TRANSPORT_FALLBACK.to_string()));
        }
    }
}
