use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

/// Single-line header: app name, server version when known, and the current
/// status message.
pub struct TitleBar {
    pub server_version: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(server_version: Option<String>, status_message: String) -> Self {
        Self {
            server_version,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " Banter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(version) = &self.server_version {
            spans.push(Span::styled(
                format!(" (server v{version})"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Gray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
