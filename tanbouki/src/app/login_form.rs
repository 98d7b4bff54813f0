use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tanbouki_core::{Credentials, SubmissionState};
use tui_input::{backend::crossterm::EventHandler, Input};

/// Shown above the form
const TITLE: &str = "三宅と矢嶋の店探訪記";

/// The email and password inputs. The values here are what the person sees;
/// the controller gets a copy every time one of them changes.
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Which field we're editing
    active: Field,

    /// Email address
    email: Input,

    /// Password (masked when rendered)
    password: Input,
}

/// One of the inputs in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Email,
    Password,
}

impl Field {
    /// With only two fields, tab and shift-tab do the same thing.
    fn other(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

impl LoginForm {
    /// The field the cursor is in
    pub fn active(&self) -> Field {
        self.active
    }

    /// What's in the email field
    pub fn email(&self) -> &str {
        self.email.value()
    }

    /// What's in the password field
    pub fn password(&self) -> &str {
        self.password.value()
    }

    /// Handle a key meant for the form. Returns the field whose value
    /// changed, if any.
    pub fn handle_event(&mut self, key: KeyEvent) -> Option<Field> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.active = self.active.other();

                None
            }
            _ => {
                let event = Event::Key(key);

                let changed = match self.active {
                    Field::Email => self.email.handle_event(&event),
                    Field::Password => self.password.handle_event(&event),
                };

                changed
                    .filter(|changed| changed.value)
                    .map(|_| self.active)
            }
        }
    }

    /// Draw the form in the middle of `body_area`.
    pub fn render(
        &self,
        body_area: Rect,
        frame: &mut Frame<'_>,
        credentials: &Credentials,
        state: &SubmissionState,
    ) {
        let popup_vert = Layout::vertical([Constraint::Length(10)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let [title_area, email_area, password_area, message_area] =
            Layout::vertical(Constraint::from_lengths([2, 3, 3, 2])).areas(popup_area);

        frame.render_widget(Paragraph::new(TITLE).centered().bold(), title_area);

        let border_style = if state.is_loading() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Blue)
        };

        self.render_field(
            frame,
            email_area,
            Field::Email,
            &credentials.email,
            border_style,
        );
        self.render_field(
            frame,
            password_area,
            Field::Password,
            &"*".repeat(credentials.password.chars().count()),
            border_style,
        );

        let message = match state {
            SubmissionState::Idle => Paragraph::new("Enter: log in · Ctrl-G: guest · F1: help"),
            SubmissionState::InFlight => Paragraph::new("Logging in…").fg(Color::Yellow),
            SubmissionState::Succeeded(_) => Paragraph::new("Logged in!").fg(Color::Green),
            SubmissionState::Failed(message) => Paragraph::new(message.as_str()).fg(Color::Red),
        };

        frame.render_widget(message.centered(), message_area);
    }

    #[expect(clippy::cast_possible_truncation)]
    fn render_field(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        field: Field,
        shown: &str,
        border_style: Style,
    ) {
        let (title, input) = match field {
            Field::Email => ("Email", &self.email),
            Field::Password => ("Password", &self.password),
        };

        let width = area.width.saturating_sub(3); // -2 for the border, -1 for the cursor
        let scroll = input.visual_scroll(width as usize);

        let widget = Paragraph::new(shown).scroll((0, scroll as u16)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );

        frame.render_widget(widget, area);

        if self.active() == field {
            frame.set_cursor_position((
                area.x + (input.visual_cursor().max(scroll) - scroll) as u16 + 1, // just past the end of the text
                area.y + 1, // +1 row for the border/title
            ));
        }
    }
}
