use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::api::types::{Message, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless widget rendering a single chat message: role and timestamp in
/// the border title, wrapped content inside.
///
/// `MessageView` is created fresh each frame by the thread view with the data
/// it needs; it holds no state of its own.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Predict the rendered height for a given width without rendering.
    ///
    /// Uses `textwrap` with options matching Ratatui's `Paragraph` wrapping,
    /// so the parent can lay out the scroll view before drawing anything.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

/// "12:04" from an RFC 3339 timestamp, or empty if it doesn't parse.
fn format_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let time = format_time(&self.message.created_at);
        let title = if time.is_empty() {
            format!(" {} ", role_label(self.message.role))
        } else {
            format!(" {} · {} ", role_label(self.message.role), time)
        };

        let block = Block::bordered()
            .title(title)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true });
        paragraph.render(inner_area, buf);
    }
}
