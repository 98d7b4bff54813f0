use crossterm::event::KeyEvent;
use tanbouki_core::{
    auth::{error, login::AuthResult, register},
    AttemptId,
};

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// The server answered (or didn't) a login attempt
    LoginFinished(AttemptId, error::Result<AuthResult>),

    /// The server answered (or didn't) a registration
    Registered(error::Result<register::Resp>),

    /// Something bad happened; display it to the user
    Problem(String),
}
