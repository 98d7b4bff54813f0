/// Client for the authentication API
pub mod client;
pub use client::Client;

/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// Log in with an email and password
pub mod login;

/// Create a new account
pub mod register;
