//! Login client for 三宅と矢嶋の店探訪記: the form state, the submission state
//! machine, and the HTTP client for the authentication API.

/// Talk to the authentication server.
pub mod auth;

/// What's been typed into the form.
pub mod credentials;
pub use credentials::Credentials;

/// How the last login attempt went.
pub mod submission;
pub use submission::{LoginIntent, SubmissionState};

/// Ties the form values and the submission state together.
pub mod controller;
pub use controller::{Attempt, AttemptId, LoginController, Snapshot};
