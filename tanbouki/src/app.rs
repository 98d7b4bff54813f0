/// Things that can happen to the app
mod action;
pub use action::Action;

/// Side effects the app asks the shell to run
mod effect;
pub use effect::{Effect, EffectContext};

/// The email/password inputs
mod login_form;
use login_form::{Field, LoginForm};

/// Things drawn over the form
mod popover;
use popover::Popover;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};
use std::process::ExitCode;
use tanbouki_core::{LoginController, LoginIntent, SubmissionState};

/// The "functional core" of the app.
#[derive(Debug)]
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// What's been typed, and how the last login went
    controller: LoginController,

    /// The inputs the person is typing into
    form: LoginForm,

    /// Anything drawn over the form
    popover: Option<Popover>,

    /// Set when we want to quit with this exit code
    exiting: Option<ExitCode>,

    /// Are we waiting on the server to create an account?
    registering: bool,
}

impl App {
    /// Create a new instance of the app
    pub fn new() -> Self {
        let mut controller = LoginController::new();
        controller.subscribe(|snapshot| {
            tracing::debug!(
                email = %snapshot.credentials.email,
                loading = snapshot.state.is_loading(),
                error = snapshot.state.error_message(),
                "login form changed"
            );
        });

        Self {
            status_line: None,
            controller,
            form: LoginForm::default(),
            popover: None,
            exiting: None,
            registering: false,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        if self.exiting.is_some() {
            frame.render_widget(Paragraph::new("Exiting…"), body_area);
        } else {
            self.form.render(
                body_area,
                frame,
                self.controller.credentials(),
                self.controller.state(),
            );

            if let Some(popover) = self.popover {
                popover.render(frame, body_area);
            }
        }

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line,
            None => "All good!",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),

            Action::LoginFinished(id, outcome) => {
                if self.controller.finish(id, outcome) {
                    self.status_line = Some(match self.controller.state() {
                        SubmissionState::Succeeded(result) => match result.token_type() {
                            Some(token_type) => format!("Logged in ({token_type} token received)"),
                            None => "Logged in".to_owned(),
                        },
                        _ => "Login failed".to_owned(),
                    });
                }

                vec![]
            }

            Action::Registered(Ok(resp)) => {
                self.registering = false;
                self.status_line = Some(resp.message);

                vec![]
            }

            Action::Registered(Err(err)) => {
                self.registering = false;
                tracing::warn!(?err, "registration failed");
                self.status_line = Some(format!("Registration failed: {}", err.user_message()));

                vec![]
            }

            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.popover.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
                self.popover = None;
            }

            return vec![];
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::F(1) => {
                self.popover = Some(Popover::Help);

                vec![]
            }
            KeyCode::Enter => self.submit(LoginIntent::Primary),
            KeyCode::Char('g') if ctrl => self.submit(LoginIntent::Guest),
            KeyCode::Char('r') if ctrl => self.register(),
            _ => {
                match self.form.handle_event(key) {
                    Some(Field::Email) => self.controller.set_email(self.form.email()),
                    Some(Field::Password) => self.controller.set_password(self.form.password()),
                    None => {}
                }

                vec![]
            }
        }
    }

    fn submit(&mut self, intent: LoginIntent) -> Vec<Effect> {
        if self.registering {
            self.status_line = Some("Still waiting on the server…".to_owned());

            return vec![];
        }

        match self.controller.begin_submit(intent) {
            Some(attempt) => {
                self.status_line = None;

                vec![Effect::LogIn(attempt)]
            }
            None => {
                self.status_line = Some("Still waiting on the server…".to_owned());

                vec![]
            }
        }
    }

    /// One registration at a time, and never while a login is outstanding.
    fn register(&mut self) -> Vec<Effect> {
        if self.registering || self.controller.is_loading() {
            self.status_line = Some("Still waiting on the server…".to_owned());

            return vec![];
        }

        self.registering = true;
        self.status_line = Some("Registering…".to_owned());

        vec![Effect::Register(
            self.controller.credentials().to_login_req(),
        )]
    }

    fn quit(&mut self) -> Vec<Effect> {
        self.exiting = Some(ExitCode::SUCCESS);

        vec![]
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exiting
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
