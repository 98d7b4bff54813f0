use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Row, Table},
    Frame,
};

/// States shown above the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popover {
    /// Show a table of keyboard shortcuts
    Help,
}

impl Popover {
    /// Render the popover over `body_area`
    pub fn render(self, frame: &mut Frame<'_>, body_area: Rect) {
        match self {
            Popover::Help => {
                let popup_vert = Layout::vertical([Constraint::Length(10)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let popup = Table::new(
                    [
                        Row::new(vec!["F1", "Display / close this help"]),
                        Row::new(vec!["tab / shift-tab", "Switch field"]),
                        Row::new(vec!["enter", "Log in"]),
                        Row::new(vec!["ctrl-g", "Log in as guest"]),
                        Row::new(vec!["ctrl-r", "Register these credentials"]),
                        Row::new(vec!["esc / ctrl-c", "Quit"]),
                    ],
                    [Constraint::Max(16), Constraint::Fill(1)],
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Keyboard Shortcuts")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::new().blue()),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
        }
    }
}
